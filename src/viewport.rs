// ABOUTME: Viewport dimensions and the WIDTHxHEIGHT size argument parser
// ABOUTME: Rejects malformed or zero-sized viewports before any browser is launched

use crate::errors::{Result, SlideshotError};
use std::fmt;
use std::str::FromStr;

/// Pixel dimensions of the virtual browser window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SlideshotError::InvalidArgument(format!(
                "viewport dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: crate::config::DEFAULT_WIDTH,
            height: crate::config::DEFAULT_HEIGHT,
        }
    }
}

impl fmt::Display for ViewportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ViewportSize {
    type Err = SlideshotError;

    fn from_str(s: &str) -> Result<Self> {
        parse_size(s)
    }
}

/// Parse a `WIDTHxHEIGHT` token such as `1500x2000` (the `x` is case-insensitive).
pub fn parse_size(input: &str) -> Result<ViewportSize> {
    let invalid = || {
        SlideshotError::InvalidArgument(format!(
            "invalid size '{}', expected WIDTHxHEIGHT such as 1500x2000",
            input
        ))
    };

    let lowered = input.to_lowercase();
    let (width, height) = lowered.split_once('x').ok_or_else(invalid)?;

    let parse_dim = |part: &str| -> Result<u32> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse::<u32>().map_err(|_| invalid())
    };

    ViewportSize::new(parse_dim(width)?, parse_dim(height)?)
}
