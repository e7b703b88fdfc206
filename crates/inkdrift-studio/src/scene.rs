use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use inkdrift_engine::coords::{Vec2, Viewport};
use inkdrift_engine::core::{App, AppControl, FrameCtx, StartCtx};
use inkdrift_engine::motion::{glyph_extent, AnimationLoop};
use inkdrift_engine::paint::Color;
use inkdrift_engine::raster::Surface;
use inkdrift_engine::render::{Layer, LayerRenderer, RingRenderer, ShaderProgram, Texture};
use inkdrift_engine::text::{rasterize_glyph, Font, GlyphStyle, GLYPH_COLOR};
use inkdrift_engine::time::Debounce;

use crate::assets::{AssetLoader, Background, LoadStatus};
use crate::shaders::{LAYER_FRAGMENT, LAYER_VERTEX};

/// Quiet period before a resize re-rasterizes the glyph.
const RESIZE_QUIET: Duration = Duration::from_millis(100);

/// Reports a viewport change once it has settled.
#[derive(Debug)]
struct ViewportWatch {
    last: Viewport,
    settle: Debounce<Viewport>,
}

impl ViewportWatch {
    fn new(initial: Viewport) -> Self {
        Self {
            last: initial,
            settle: Debounce::new(RESIZE_QUIET),
        }
    }

    fn observe(&mut self, viewport: Viewport, now: Instant) -> Option<Viewport> {
        if viewport != self.last {
            self.last = viewport;
            self.settle.push(viewport, now);
        }
        self.settle.poll(now)
    }
}

/// Pixel side of the glyph texture for `extent`, within the device limit.
fn glyph_side(extent: f32, max_side: u32) -> u32 {
    (extent.round() as u32).clamp(1, max_side.max(1))
}

struct Gfx {
    max_texture_side: u32,
    renderer: LayerRenderer,
    ring: RingRenderer,
    glyph_surface: Surface,
    background: Option<Layer>,
    glyph: Option<Layer>,
}

/// Background trail, spinning glyph and pointer ring.
pub struct Scene {
    font: Font,
    style: GlyphStyle,
    image_path: PathBuf,
    loader: Option<AssetLoader>,
    animation: AnimationLoop,
    glyph_extent: f32,
    watch: Option<ViewportWatch>,
    gfx: Option<Gfx>,
}

impl Scene {
    pub fn new(font: Font, style: GlyphStyle, image_path: PathBuf) -> Self {
        Self {
            font,
            style,
            image_path,
            loader: None,
            animation: AnimationLoop::new(),
            glyph_extent: 0.0,
            watch: None,
            gfx: None,
        }
    }

    fn poll_loader(&mut self, ctx: &FrameCtx<'_, '_>) {
        let Some(loader) = &self.loader else {
            return;
        };

        match loader.poll() {
            LoadStatus::Pending => {}
            LoadStatus::Ready(background) => {
                self.loader = None;
                self.install_layers(ctx, &background);
            }
            LoadStatus::Failed(err) => {
                self.loader = None;
                log::error!("{err:#}");
                log::warn!("no background; nothing will be drawn");
            }
        }
    }

    fn install_layers(&mut self, ctx: &FrameCtx<'_, '_>, background: &Background) {
        let Some(gfx) = &mut self.gfx else {
            return;
        };
        let device = ctx.gpu.device();
        let queue = ctx.gpu.queue();

        let image = Texture::from_image(device, queue, "inkdrift background", &background.pixels);
        let glyph = Texture::from_surface(device, queue, "inkdrift glyph", &gfx.glyph_surface);
        gfx.background = Some(gfx.renderer.create_layer(device, "background", image));
        gfx.glyph = Some(gfx.renderer.create_layer(device, "glyph", glyph));

        let (w, h) = background.intrinsic;
        let size = Vec2::new(w as f32, h as f32);
        self.animation.start(ctx.window.viewport(), size, ctx.input);
    }

    fn apply_resize(&mut self, ctx: &FrameCtx<'_, '_>, viewport: Viewport) {
        let Some(gfx) = &mut self.gfx else {
            return;
        };

        self.glyph_extent = glyph_extent(viewport);
        let side = glyph_side(self.glyph_extent, gfx.max_texture_side);
        gfx.glyph_surface = rasterize_glyph(&self.font, &self.style, side);
        log::debug!("glyph re-rasterized at {side}px for {}x{}", viewport.width, viewport.height);

        if let Some(layer) = &mut gfx.glyph {
            let device = ctx.gpu.device();
            let texture = Texture::from_surface(device, ctx.gpu.queue(), "inkdrift glyph", &gfx.glyph_surface);
            gfx.renderer.set_texture(device, layer, texture);
        }
    }
}

impl App for Scene {
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> Result<()> {
        let program = ShaderProgram::compile(ctx.device(), "inkdrift layer", LAYER_VERTEX, LAYER_FRAGMENT)?;
        let renderer = LayerRenderer::new(ctx.device(), ctx.surface_format(), &program);

        let max_texture_side = ctx.device().limits().max_texture_dimension_2d;
        self.loader = Some(AssetLoader::spawn(self.image_path.clone(), max_texture_side)?);

        let viewport = ctx.window.viewport();
        self.glyph_extent = glyph_extent(viewport);
        let side = glyph_side(self.glyph_extent, max_texture_side);
        let glyph_surface = rasterize_glyph(&self.font, &self.style, side);

        self.watch = Some(ViewportWatch::new(viewport));
        self.gfx = Some(Gfx {
            max_texture_side,
            renderer,
            ring: RingRenderer::new(),
            glyph_surface,
            background: None,
            glyph: None,
        });

        log::info!(
            "scene ready: glyph {:?} at {}px, surface {:?}",
            self.style.ch,
            side,
            ctx.surface_format()
        );
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();

        let settled = self
            .watch
            .as_mut()
            .and_then(|watch| watch.observe(viewport, ctx.time.now));
        if let Some(settled) = settled {
            self.apply_resize(ctx, settled);
        }

        self.poll_loader(ctx);

        let plan = self.animation.frame(ctx.input, viewport, self.glyph_extent, ctx.time.dt);

        let Some(gfx) = &mut self.gfx else {
            return AppControl::Continue;
        };
        let Gfx {
            renderer,
            ring,
            background,
            glyph,
            ..
        } = gfx;
        let ink = Color::from_srgb_u8(GLYPH_COLOR[0], GLYPH_COLOR[1], GLYPH_COLOR[2], GLYPH_COLOR[3]);

        ctx.render(Color::transparent(), |rctx, target| {
            let (Some(plan), Some(background), Some(glyph)) = (plan, background.as_mut(), glyph.as_mut()) else {
                return;
            };
            renderer.draw_layer(rctx, target, background, &plan.background);
            renderer.draw_layer(rctx, target, glyph, &plan.glyph);
            ring.render(rctx, target, plan.ring.center, plan.ring.radius, ink);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    // ── resize settling ───────────────────────────────────────────────────

    #[test]
    fn unchanged_viewport_never_fires() {
        let t0 = Instant::now();
        let mut watch = ViewportWatch::new(VP);
        for ms in [0, 50, 150, 500] {
            assert_eq!(watch.observe(VP, t0 + Duration::from_millis(ms)), None);
        }
    }

    #[test]
    fn change_fires_after_quiet_period() {
        let t0 = Instant::now();
        let mut watch = ViewportWatch::new(VP);
        let resized = Viewport::new(1024.0, 768.0);

        assert_eq!(watch.observe(resized, t0), None);
        assert_eq!(watch.observe(resized, t0 + Duration::from_millis(50)), None);
        assert_eq!(watch.observe(resized, t0 + Duration::from_millis(100)), Some(resized));
        assert_eq!(watch.observe(resized, t0 + Duration::from_millis(300)), None);
    }

    #[test]
    fn burst_of_resizes_reports_the_last_one() {
        let t0 = Instant::now();
        let mut watch = ViewportWatch::new(VP);
        for (i, w) in [900.0, 950.0, 1000.0].into_iter().enumerate() {
            let at = t0 + Duration::from_millis(30 * i as u64);
            assert_eq!(watch.observe(Viewport::new(w, 600.0), at), None);
        }
        let fired = watch.observe(Viewport::new(1000.0, 600.0), t0 + Duration::from_millis(160));
        assert_eq!(fired, Some(Viewport::new(1000.0, 600.0)));
    }

    // ── glyph sizing ──────────────────────────────────────────────────────

    #[test]
    fn glyph_side_rounds_and_never_hits_zero() {
        assert_eq!(glyph_side(glyph_extent(VP), 8192), 450);
        assert_eq!(glyph_side(224.6, 8192), 225);
        assert_eq!(glyph_side(0.0, 8192), 1);
    }

    #[test]
    fn glyph_side_respects_texture_limit() {
        let huge = glyph_extent(Viewport::new(16000.0, 12000.0));
        assert_eq!(glyph_side(huge, 8192), 8192);
        assert_eq!(glyph_side(450.0, 0), 1);
    }
}
