// ABOUTME: Slide export module for the slideshot application
// ABOUTME: Captures every .slide element of an HTML page as a fixed-size JPEG

use crate::browser::{BrowserSession, SessionMode};
use crate::config::{Config, OUTPUT_PREFIX};
use crate::errors::{Result, SlideshotError};
use crate::font::FontSpec;
use crate::utils;
use crate::viewport::ViewportSize;
use image::io::Reader as ImageReader;
use log::{info, warn};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Everything needed for one export run
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub html_file: PathBuf,
    pub viewport: ViewportSize,
    /// CSS zoom factor
    pub scale: f64,
    /// JPEG quality, 1 to 100
    pub quality: u8,
    pub font: FontSpec,
}

impl ExportRequest {
    /// Reject requests that would fail anyway, before a browser is launched
    pub fn validate(&self) -> Result<()> {
        utils::validate_file_exists(&self.html_file)?;
        ViewportSize::new(self.viewport.width, self.viewport.height)?;
        validate_scale(self.scale)?;
        crate::font::validate_stroke(self.font.stroke_width)?;
        if !(1..=100).contains(&self.quality) {
            return Err(SlideshotError::InvalidArgument(format!(
                "quality must be between 1 and 100, got {}",
                self.quality
            )));
        }
        Ok(())
    }

    /// Directory receiving the images, next to the HTML file
    pub fn output_dir(&self) -> Result<PathBuf> {
        output_dir_for(&self.html_file)
    }
}

/// One written slide image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub path: PathBuf,
    /// 1-based position of the slide in the document
    pub sequence_number: usize,
}

impl OutputArtifact {
    pub fn new(output_dir: &Path, sequence_number: usize) -> Self {
        Self {
            path: output_dir.join(slide_file_name(sequence_number)),
            sequence_number,
        }
    }
}

/// `slide_01.jpg`, `slide_02.jpg`, ... `slide_100.jpg`
pub fn slide_file_name(sequence_number: usize) -> String {
    format!("{}_{:02}.jpg", OUTPUT_PREFIX, sequence_number)
}

/// `<dir>/<stem>` for an input of `<dir>/<stem>.html`
pub fn output_dir_for(html_file: &Path) -> Result<PathBuf> {
    let stem = html_file.file_stem().ok_or_else(|| {
        SlideshotError::ValidationError(format!("Cannot derive a name from {:?}", html_file))
    })?;
    let parent = html_file.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(stem))
}

/// `1500x2000px, scale: 1.0x`
pub fn viewport_summary(viewport: ViewportSize, scale: f64) -> String {
    format!("{}px, scale: {:?}x", viewport, scale)
}

/// Check a user-supplied zoom factor
pub fn validate_scale(scale: f64) -> Result<f64> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(SlideshotError::InvalidArgument(format!(
            "scale must be a positive number, got {}",
            scale
        )));
    }
    Ok(scale)
}

/// Export every slide of `request.html_file` as a JPEG, returning the written paths in order.
pub fn export_slides(request: &ExportRequest, config: &Config) -> Result<Vec<PathBuf>> {
    info!("Exporting slides from HTML: {:?}", request.html_file);
    request.validate()?;

    let output_dir = request.output_dir()?;
    utils::ensure_directory_exists(&output_dir)?;

    let session = BrowserSession::launch(SessionMode::Headless, request.viewport, config)?;
    let result = capture_all(&session, request, &output_dir);
    session.close();
    let artifacts = result?;

    if !artifacts.is_empty() {
        println!();
        println!("Done! Generated {} images", artifacts.len());
        println!("Output directory: {}", output_dir.display());
    }

    Ok(artifacts.into_iter().map(|a| a.path).collect())
}

fn capture_all(
    session: &BrowserSession,
    request: &ExportRequest,
    output_dir: &Path,
) -> Result<Vec<OutputArtifact>> {
    session.prepare(&request.html_file, &request.font, request.scale)?;

    let slide_count = session.count_slides()?;
    if slide_count == 0 {
        warn!("No .slide elements found in {:?}", request.html_file);
        println!("Warning: no .slide elements found");
        return Ok(Vec::new());
    }

    println!("Found {} slides, capturing...", slide_count);
    println!("Viewport: {}", viewport_summary(request.viewport, request.scale));

    let start_time = Instant::now();
    let mut artifacts = Vec::with_capacity(slide_count);

    for index in 0..slide_count {
        let artifact = OutputArtifact::new(output_dir, index + 1);

        session.scroll_slide_into_view(index)?;
        let jpeg = session.capture_jpeg(request.quality)?;
        check_dimensions(&jpeg, request.viewport, artifact.sequence_number)?;
        fs::write(&artifact.path, &jpeg).map_err(SlideshotError::FileReadError)?;

        println!(
            "  [{}/{}] saved: {}",
            artifact.sequence_number,
            slide_count,
            slide_file_name(artifact.sequence_number)
        );
        artifacts.push(artifact);
    }

    info!(
        "Captured {} slides in {:.2} seconds",
        artifacts.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(artifacts)
}

/// Warn when the captured image does not match the viewport
fn check_dimensions(jpeg: &[u8], viewport: ViewportSize, sequence_number: usize) -> Result<()> {
    let (width, height) = ImageReader::new(Cursor::new(jpeg))
        .with_guessed_format()
        .map_err(SlideshotError::FileReadError)?
        .into_dimensions()?;

    if (width, height) != (viewport.width, viewport.height) {
        warn!(
            "Slide {} captured at {}x{} instead of {}",
            sequence_number, width, height, viewport
        );
    }
    Ok(())
}
