// ABOUTME: Utility functions for the slideshot application
// ABOUTME: Provides helpers for validation, path handling and file URLs

use crate::errors::{Result, SlideshotError};
use std::path::{Path, PathBuf};

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SlideshotError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SlideshotError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(SlideshotError::FileReadError)?;
    } else if !path.is_dir() {
        return Err(SlideshotError::ValidationError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Get the absolute path
pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).map_err(|e| {
        SlideshotError::ValidationError(format!(
            "Failed to get absolute path for {:?}: {}",
            path, e
        ))
    })
}

/// Convert an absolute path into a `file://` URL with proper percent-encoding
pub fn file_url(absolute: &Path) -> Result<String> {
    url::Url::from_file_path(absolute)
        .map(|u| u.to_string())
        .map_err(|_| {
            SlideshotError::ValidationError(format!(
                "Cannot build a file URL from {:?}",
                absolute
            ))
        })
}
