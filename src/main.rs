//! Entry point for the calocam application.
//!
//! Startup order:
//! 1. parse CLI arguments and load settings,
//! 2. bind the configured camera device (awaited once; failure degrades to
//!    an unavailable capture surface, never an exit),
//! 3. run the egui event loop on the main thread while the tokio runtime
//!    hosts the camera stream and recognition dispatches.

use anyhow::Result;
use calocam::camera::{CameraService, FrameSource, MockCamera};
use calocam::config::{CameraSourceKind, Settings};
use calocam::gui::Gui;
use calocam::recognize::{DishRecognizer, MockRecognizer};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "calocam")]
#[command(about = "Photo-based food calorie diary", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use a real webcam instead of the mock camera (requires the `webcam`
    /// build feature)
    #[arg(long)]
    webcam: bool,

    /// Device index for the webcam source (overrides the config file)
    #[arg(long)]
    webcam_index: Option<u32>,

    /// Fixed seed for the mock recognizer (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("calocam=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.webcam {
        settings.camera.source = CameraSourceKind::Webcam;
    }
    if let Some(index) = cli.webcam_index {
        settings.camera.webcam_index = index;
    }
    if let Some(seed) = cli.seed {
        settings.recognizer.seed = Some(seed);
    }

    info!("starting calocam");

    let camera = CameraService::connect(build_source(&settings)).await;
    let recognizer: Arc<dyn DishRecognizer> = match settings.recognizer.seed {
        Some(seed) => Arc::new(MockRecognizer::seeded(seed)),
        None => Arc::new(MockRecognizer::new()),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Calocam",
        options,
        Box::new(move |cc| Ok(Box::new(Gui::new(cc, camera, recognizer)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run GUI: {err}"))?;

    info!("calocam closed");
    Ok(())
}

/// Build the configured capture device.
///
/// Returns `None` when the capability is absent (webcam requested without
/// the `webcam` feature); the capture surface then starts unavailable.
fn build_source(settings: &Settings) -> Option<Arc<dyn FrameSource>> {
    match settings.camera.source {
        CameraSourceKind::Mock => Some(Arc::new(MockCamera::new(
            settings.camera.width,
            settings.camera.height,
            settings.camera.fps,
        ))),
        CameraSourceKind::Webcam => {
            #[cfg(feature = "webcam")]
            {
                Some(Arc::new(calocam::camera::WebcamSource::new(
                    settings.camera.webcam_index,
                )))
            }
            #[cfg(not(feature = "webcam"))]
            {
                tracing::warn!("{}", calocam::error::CalocamError::WebcamFeatureDisabled);
                None
            }
        }
    }
}
