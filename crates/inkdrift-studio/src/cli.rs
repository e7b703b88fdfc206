use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "inkdrift",
    author,
    version,
    about = "Background image that trails the pointer, with a rotating glyph on top"
)]
pub struct Cli {
    /// Background image (PNG, JPEG, BMP, GIF or WebP).
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Font used to draw the glyph. System fonts are probed when omitted.
    #[arg(long, env = "INKDRIFT_FONT", value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Character drawn in the glyph layer.
    #[arg(long, default_value_t = 'K')]
    pub glyph: char,

    /// Window title.
    #[arg(long, default_value = "inkdrift")]
    pub title: String,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 1280.0, value_parser = parse_extent)]
    pub width: f64,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 720.0, value_parser = parse_extent)]
    pub height: f64,

    /// Log filter in `env_logger` syntax (e.g. `debug` or `inkdrift_engine=trace`).
    #[arg(long, env = "INKDRIFT_LOG", value_name = "FILTER")]
    pub log: Option<String>,
}

fn parse_extent(raw: &str) -> Result<f64, String> {
    let v: f64 = raw
        .parse()
        .map_err(|err| format!("`{raw}` is not a number: {err}"))?;
    if !v.is_finite() || v < 1.0 {
        return Err(format!("`{raw}` must be at least 1"));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_only_uses_defaults() {
        let cli = Cli::try_parse_from(["inkdrift", "bg.jpg"]).unwrap();
        assert_eq!(cli.image, PathBuf::from("bg.jpg"));
        assert_eq!(cli.glyph, 'K');
        assert_eq!(cli.title, "inkdrift");
        assert_eq!((cli.width, cli.height), (1280.0, 720.0));
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "inkdrift", "bg.png", "--font", "/tmp/a.ttf", "--glyph", "Q", "--width", "800",
            "--height", "600", "--log", "debug",
        ])
        .unwrap();
        assert_eq!(cli.font, Some(PathBuf::from("/tmp/a.ttf")));
        assert_eq!(cli.glyph, 'Q');
        assert_eq!((cli.width, cli.height), (800.0, 600.0));
        assert_eq!(cli.log.as_deref(), Some("debug"));
    }

    #[test]
    fn image_is_required() {
        assert!(Cli::try_parse_from(["inkdrift"]).is_err());
    }

    #[test]
    fn non_positive_size_is_rejected() {
        assert!(Cli::try_parse_from(["inkdrift", "bg.png", "--width", "0"]).is_err());
        assert!(Cli::try_parse_from(["inkdrift", "bg.png", "--height", "wide"]).is_err());
    }

    #[test]
    fn glyph_must_be_one_char() {
        assert!(Cli::try_parse_from(["inkdrift", "bg.png", "--glyph", "KK"]).is_err());
    }
}
