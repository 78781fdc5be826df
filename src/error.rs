//! Custom error types for the application.
//!
//! This module defines the primary error type, `CalocamError`, for the entire
//! application. Using the `thiserror` crate, it provides a centralized and
//! consistent way to handle the different kinds of failures that can occur,
//! from configuration issues to image-encoding problems.
//!
//! Camera and recognition failures are deliberately *not* represented here:
//! both boundaries use `anyhow::Result`, acquisition failures degrade the
//! capture surface to an "unavailable" state, and the errors are only
//! logged. The variants here exist for the places that do propagate errors
//! (startup configuration, image encoding).

use thiserror::Error;

/// Convenience alias for results using the application error type.
pub type AppResult<T> = std::result::Result<T, CalocamError>;

#[derive(Error, Debug)]
pub enum CalocamError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageEncoding(#[from] image::ImageError),

    #[error("Webcam support not enabled. Rebuild with --features webcam")]
    WebcamFeatureDisabled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webcam_feature_message_names_the_flag() {
        let err = CalocamError::WebcamFeatureDisabled;
        assert!(err.to_string().contains("--features webcam"));
    }

    #[test]
    fn validation_error_message() {
        let err = CalocamError::Configuration("fps must be positive".to_string());
        assert!(err.to_string().contains("fps must be positive"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CalocamError = io.into();
        assert!(matches!(err, CalocamError::Io(_)));
    }
}
