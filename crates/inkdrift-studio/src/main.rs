mod assets;
mod cli;
mod fonts;
mod scene;
mod shaders;

use anyhow::Result;
use clap::Parser;
use inkdrift_engine::device::GpuInit;
use inkdrift_engine::logging::{init_logging, LoggingConfig};
use inkdrift_engine::text::GlyphStyle;
use inkdrift_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::cli::Cli;
use crate::scene::Scene;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let font = fonts::load_font(cli.font.as_deref(), cli.glyph)?;
    let scene = Scene::new(font, GlyphStyle::stroked(cli.glyph), cli.image.clone());

    let config = RuntimeConfig {
        title: cli.title,
        initial_size: LogicalSize::new(cli.width, cli.height),
        transparent: true,
    };

    Runtime::run(config, GpuInit::default(), scene)
}
