//! Four textured characters animated under a fixed orthographic camera.
//!
//! ```sh
//! cargo run -p vignette-demo -- --config stage.json --log debug
//! ```

mod cast;
mod config;
mod stage;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use vignette_engine::coords::Camera;
use vignette_engine::device::GpuInit;
use vignette_engine::logging::{init_logging, LoggingConfig};
use vignette_engine::window::{Runtime, RuntimeConfig};

use crate::config::DemoConfig;
use crate::stage::StageApp;

#[derive(Parser)]
#[command(name = "vignette-demo", about = "Animated sprite stage")]
struct Cli {
    /// JSON settings file (window, background, camera, assets)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory with the sprite images; overrides the config file
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Log filter in env_logger syntax, e.g. "debug" or "vignette_engine=trace"
    #[arg(long)]
    log: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(LoggingConfig::default().with_filter(cli.log.clone()));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => DemoConfig::load(path).context("failed to load settings")?,
        None => DemoConfig::default(),
    };

    let assets = cli
        .assets
        .or_else(|| config.assets.clone())
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"));
    log::info!("assets from {}", assets.display());

    let runtime = RuntimeConfig {
        title: config.window.title.clone(),
        initial_size: LogicalSize::new(config.window.width.into(), config.window.height.into()),
        resizable: config.window.resizable,
    };

    // Texels reach the framebuffer unconverted.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    let app = StageApp::new(
        assets,
        Camera::orthographic(&config.camera),
        config.clear_color(),
    );

    Runtime::run(runtime, gpu_init, app)
}
