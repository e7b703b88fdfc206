use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Decoded background image, ready for upload.
#[derive(Debug)]
pub struct Background {
    /// Pixels to upload; never larger than the loader's `max_side`.
    pub pixels: RgbaImage,

    /// Size of the image as decoded. Layout uses this, not the pixel size.
    pub intrinsic: (u32, u32),
}

/// Outcome of polling the background loader.
#[derive(Debug)]
pub enum LoadStatus {
    Pending,
    Ready(Background),
    Failed(anyhow::Error),
}

/// Decodes the background image on a worker thread.
///
/// The result is handed over once; after `Ready` or `Failed` the loader
/// should be dropped.
pub struct AssetLoader {
    rx: Receiver<Result<Background>>,
}

impl AssetLoader {
    /// Starts decoding `path`. Images with a side longer than `max_side` are
    /// downscaled to fit, keeping their aspect ratio.
    pub fn spawn(path: PathBuf, max_side: u32) -> Result<Self> {
        let (tx, rx) = bounded(1);
        log::info!("loading background {}", path.display());
        thread::Builder::new()
            .name("inkdrift-assets".into())
            .spawn(move || {
                let result = decode(&path, max_side);
                let _ = tx.send(result);
            })
            .map_err(|err| anyhow!("failed to spawn asset loader thread: {err}"))?;

        Ok(Self { rx })
    }

    /// Non-blocking check for the decoded image.
    pub fn poll(&self) -> LoadStatus {
        match self.rx.try_recv() {
            Ok(result) => into_status(result),
            Err(TryRecvError::Empty) => LoadStatus::Pending,
            Err(TryRecvError::Disconnected) => {
                LoadStatus::Failed(anyhow!("asset loader exited without a result"))
            }
        }
    }
}

fn into_status(result: Result<Background>) -> LoadStatus {
    match result {
        Ok(background) => LoadStatus::Ready(background),
        Err(err) => LoadStatus::Failed(err),
    }
}

fn decode(path: &Path, max_side: u32) -> Result<Background> {
    let started = std::time::Instant::now();
    let image = image::open(path)
        .with_context(|| format!("failed to decode background image {}", path.display()))?
        .to_rgba8();
    let intrinsic = image.dimensions();
    log::info!(
        "decoded {} ({}x{}) in {:?}",
        path.display(),
        intrinsic.0,
        intrinsic.1,
        started.elapsed()
    );

    Ok(Background {
        pixels: fit_within(image, max_side),
        intrinsic,
    })
}

/// Downscales `image` so neither side exceeds `max_side`.
fn fit_within(image: RgbaImage, max_side: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let longest = w.max(h);
    if max_side == 0 || longest <= max_side {
        return image;
    }

    let scale = max_side as f64 / longest as f64;
    let nw = ((w as f64 * scale).round() as u32).clamp(1, max_side);
    let nh = ((h as f64 * scale).round() as u32).clamp(1, max_side);
    log::warn!("background {w}x{h} exceeds the {max_side}px texture limit, downscaling to {nw}x{nh}");

    imageops::resize(&image, nw, nh, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossbeam_channel::RecvTimeoutError;

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);
    const NO_LIMIT: u32 = 8192;

    impl AssetLoader {
        fn wait(&self, timeout: Duration) -> LoadStatus {
            match self.rx.recv_timeout(timeout) {
                Ok(result) => into_status(result),
                Err(RecvTimeoutError::Timeout) => LoadStatus::Pending,
                Err(RecvTimeoutError::Disconnected) => {
                    LoadStatus::Failed(anyhow!("asset loader exited without a result"))
                }
            }
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("inkdrift-{}-{name}", std::process::id()))
    }

    // ── loading ───────────────────────────────────────────────────────────

    #[test]
    fn decodes_png_on_worker() {
        let path = temp_path("bg.png");
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();

        let loader = AssetLoader::spawn(path.clone(), NO_LIMIT).unwrap();
        match loader.wait(TIMEOUT) {
            LoadStatus::Ready(bg) => {
                assert_eq!(bg.intrinsic, (3, 2));
                assert_eq!(bg.pixels.dimensions(), (3, 2));
                assert_eq!(bg.pixels.get_pixel(2, 1).0, [10, 20, 30, 255]);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn oversized_image_is_downscaled_but_keeps_intrinsic_size() {
        let path = temp_path("wide.png");
        RgbaImage::from_pixel(40, 10, image::Rgba([255, 0, 0, 255])).save(&path).unwrap();

        let loader = AssetLoader::spawn(path.clone(), 16).unwrap();
        match loader.wait(TIMEOUT) {
            LoadStatus::Ready(bg) => {
                assert_eq!(bg.intrinsic, (40, 10));
                assert_eq!(bg.pixels.dimensions(), (16, 4));
            }
            other => panic!("expected Ready, got {other:?}"),
        }
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_fails_with_path() {
        let loader = AssetLoader::spawn(temp_path("missing.png"), NO_LIMIT).unwrap();
        match loader.wait(TIMEOUT) {
            LoadStatus::Failed(err) => assert!(format!("{err:#}").contains("missing.png")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn result_is_delivered_once() {
        let loader = AssetLoader::spawn(temp_path("also-missing.png"), NO_LIMIT).unwrap();
        assert!(matches!(loader.wait(TIMEOUT), LoadStatus::Failed(_)));
        // the worker has hung up; further polls report that instead of a result
        assert!(matches!(loader.wait(TIMEOUT), LoadStatus::Failed(_)));
        assert!(matches!(loader.poll(), LoadStatus::Failed(_)));
    }

    // ── texture limit ─────────────────────────────────────────────────────

    #[test]
    fn image_past_the_limit_is_shrunk_to_it() {
        let wide = fit_within(RgbaImage::new(9000, 100), 8192);
        assert_eq!(wide.dimensions(), (8192, 91));

        let tall = fit_within(RgbaImage::new(30, 12000), 8192);
        assert_eq!(tall.dimensions(), (20, 8192));
    }

    #[test]
    fn image_within_the_limit_is_untouched() {
        let img = RgbaImage::from_pixel(8192, 5, image::Rgba([1, 2, 3, 4]));
        let fitted = fit_within(img.clone(), 8192);
        assert_eq!(fitted, img);
    }

    #[test]
    fn sliver_never_collapses_to_zero() {
        assert_eq!(fit_within(RgbaImage::new(20000, 1), 8192).dimensions(), (8192, 1));
    }
}
