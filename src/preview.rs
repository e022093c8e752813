// ABOUTME: Preview module for the slideshot application
// ABOUTME: Opens a visible browser with the export styling applied until the operator closes it

use crate::browser::{BrowserSession, SessionMode};
use crate::config::Config;
use crate::errors::{Result, SlideshotError};
use crate::export::viewport_summary;
use crate::font::FontSpec;
use crate::utils;
use crate::viewport::ViewportSize;
use log::info;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Settings for a preview window
#[derive(Debug, Clone)]
pub struct PreviewRequest {
    pub html_file: PathBuf,
    pub viewport: ViewportSize,
    pub scale: f64,
    pub font: FontSpec,
}

impl PreviewRequest {
    pub fn validate(&self) -> Result<()> {
        utils::validate_file_exists(&self.html_file)?;
        ViewportSize::new(self.viewport.width, self.viewport.height)?;
        crate::export::validate_scale(self.scale)?;
        crate::font::validate_stroke(self.font.stroke_width)?;
        Ok(())
    }
}

/// Show the styled page in a visible window and block until a line arrives on `input`.
pub fn preview_page<R: BufRead>(
    request: &PreviewRequest,
    config: &Config,
    input: &mut R,
) -> Result<()> {
    info!("Previewing HTML: {:?}", request.html_file);
    request.validate()?;

    let session = BrowserSession::launch(SessionMode::Visible, request.viewport, config)?;
    let result = session
        .prepare(&request.html_file, &request.font, request.scale)
        .and_then(|()| {
            println!(
                "Preview - viewport: {}",
                viewport_summary(request.viewport, request.scale)
            );
            println!("Press Enter to close the browser...");
            wait_for_acknowledgement(input)
        });
    session.close();
    result
}

/// Block until one line is read; end of input without a line is an error.
pub fn wait_for_acknowledgement<R: BufRead>(input: &mut R) -> Result<()> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(SlideshotError::FileReadError)?;
    if read == 0 {
        return Err(SlideshotError::FileReadError(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before the preview was acknowledged",
        )));
    }
    Ok(())
}
