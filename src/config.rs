//! Configuration management.
//!
//! Settings are loaded from an optional TOML file; every field has a
//! sensible default so the application runs with no configuration at all.
use crate::error::{AppResult, CalocamError};
use config::Config;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub recognizer: RecognizerSettings,
}

/// Which capture device to bind at startup.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CameraSourceKind {
    /// Synthetic test-pattern camera, always present.
    Mock,
    /// Real webcam via the `webcam` feature.
    Webcam,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraSettings {
    #[serde(default = "default_source")]
    pub source: CameraSourceKind,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Device index for the webcam source (rear camera is usually 0).
    #[serde(default)]
    pub webcam_index: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RecognizerSettings {
    /// Fixed seed for the mock recognizer; random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_source() -> CameraSourceKind {
    CameraSourceKind::Mock
}
fn default_width() -> u32 {
    640
}
fn default_height() -> u32 {
    480
}
fn default_fps() -> f64 {
    15.0
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            source: default_source(),
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            webcam_index: 0,
        }
    }
}

impl Settings {
    /// Load settings from an optional TOML file, falling back to defaults.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let settings = match path {
            Some(path) => {
                let s = Config::builder()
                    .add_source(config::File::from(path))
                    .build()
                    .map_err(CalocamError::Config)?;
                s.try_deserialize().map_err(CalocamError::Config)?
            }
            None => Settings::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Semantic validation beyond what deserialization can catch.
    pub fn validate(&self) -> AppResult<()> {
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(CalocamError::Configuration(
                "camera resolution must be non-zero".to_string(),
            ));
        }
        if self.camera.fps <= 0.0 {
            return Err(CalocamError::Configuration(
                "camera fps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.camera.source, CameraSourceKind::Mock);
        assert_eq!(settings.camera.width, 640);
        assert_eq!(settings.camera.height, 480);
        assert!(settings.recognizer.seed.is_none());
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let settings = Settings::load(None).expect("defaults load");
        assert_eq!(settings.camera.fps, 15.0);
    }

    #[test]
    fn load_from_file_overrides_defaults() {
        let dir = std::env::temp_dir();
        let path = dir.join("calocam_config_test.toml");
        let mut file = std::fs::File::create(&path).expect("create temp config");
        writeln!(
            file,
            "[camera]\nsource = \"mock\"\nwidth = 320\nheight = 240\n\n[recognizer]\nseed = 7"
        )
        .expect("write temp config");

        let settings = Settings::load(Some(&path)).expect("load from file");
        assert_eq!(settings.camera.width, 320);
        assert_eq!(settings.camera.height, 240);
        // Unspecified fields keep their defaults.
        assert_eq!(settings.camera.fps, 15.0);
        assert_eq!(settings.recognizer.seed, Some(7));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let mut settings = Settings::default();
        settings.camera.width = 0;
        assert!(matches!(
            settings.validate(),
            Err(CalocamError::Configuration(_))
        ));
    }

    #[test]
    fn non_positive_fps_is_rejected() {
        let mut settings = Settings::default();
        settings.camera.fps = 0.0;
        assert!(settings.validate().is_err());
    }
}
