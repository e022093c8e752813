// ABOUTME: Error types for the slideshot application
// ABOUTME: Provides structured error handling for argument parsing, setup and capture

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideshotError {
    #[error("File operation failed: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File does not exist: {}", .0.display())]
    PathNotFoundError(PathBuf),

    #[error("Headless browser error: {message}")]
    BrowserError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to capture screenshot: {0}")]
    ScreenshotError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

impl SlideshotError {
    /// Build a browser error for a failed DevTools operation.
    pub fn browser(context: &str, err: anyhow::Error) -> Self {
        SlideshotError::BrowserError {
            message: format!("{}: {}", context, err),
            source: Some(err.into()),
        }
    }

    /// Whether this error means an input file was missing
    pub fn is_missing_file(&self) -> bool {
        matches!(self, SlideshotError::PathNotFoundError(_))
    }
}

// Implement conversion from anyhow::Error to our SlideshotError
impl From<anyhow::Error> for SlideshotError {
    fn from(err: anyhow::Error) -> Self {
        SlideshotError::UnknownError(err.to_string())
    }
}

impl From<image::ImageError> for SlideshotError {
    fn from(err: image::ImageError) -> Self {
        SlideshotError::ScreenshotError(format!("Failed to decode captured image: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SlideshotError>;
