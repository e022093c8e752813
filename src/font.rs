// ABOUTME: Custom font handling for the slideshot application
// ABOUTME: Builds the @font-face stylesheet and the synthetic stroke used to boost weight

use crate::errors::{Result, SlideshotError};
use crate::utils;
use std::path::{Path, PathBuf};

/// Fonts tried after the custom family when it fails to load.
pub const FALLBACK_FAMILIES: &[&str] = &["'Kaiti SC'", "'KaiTi'", "serif"];

/// Which font to force on the slides, and how much synthetic weight to add
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub file_path: Option<PathBuf>,
    pub family: String,
    pub stroke_width: f64,
}

impl FontSpec {
    /// The font file, if one was configured and it exists on disk
    pub fn available_file(&self) -> Option<&Path> {
        self.file_path.as_deref().filter(|p| p.is_file())
    }

    pub fn has_stroke(&self) -> bool {
        self.stroke_width > 0.0
    }

    /// Human readable summary printed once the font is in place
    pub fn describe(&self, font_file: &Path) -> String {
        let file_name = font_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut summary = format!("{} ({})", self.family, file_name);
        if self.has_stroke() {
            summary.push_str(&format!(", stroke +{:?}px", self.stroke_width));
        }
        summary
    }

    /// Stylesheet registering the font file and forcing it on the document
    pub fn stylesheet(&self, font_file: &Path) -> Result<String> {
        let absolute = utils::get_absolute_path(font_file)?;
        let font_url = utils::file_url(&absolute)?;
        Ok(font_face_css(&font_url, &self.family, self.stroke_width))
    }
}

/// Build the CSS that registers `font_url` as `family` and applies it to body and slides.
///
/// A positive `stroke_width` adds a text stroke painted under the fill, which thickens
/// glyphs of families that ship without a bold face.
pub fn font_face_css(font_url: &str, family: &str, stroke_width: f64) -> String {
    let family = family.replace('\\', "\\\\").replace('\'', "\\'");

    let stroke_css = if stroke_width > 0.0 {
        format!(
            "\n            -webkit-text-stroke: {}px currentColor;\n            paint-order: stroke fill;",
            stroke_width
        )
    } else {
        String::new()
    };

    format!(
        r#"
        @font-face {{
            font-family: '{family}';
            src: url('{url}') format('truetype');
            font-weight: normal;
            font-style: normal;
        }}
        body, .slide, .slide * {{
            font-family: '{family}', {fallbacks} !important;{stroke}
        }}
    "#,
        family = family,
        url = font_url,
        fallbacks = FALLBACK_FAMILIES.join(", "),
        stroke = stroke_css,
    )
}

/// Check a user-supplied stroke width
pub fn validate_stroke(stroke_width: f64) -> Result<f64> {
    if !stroke_width.is_finite() || stroke_width < 0.0 {
        return Err(SlideshotError::InvalidArgument(format!(
            "stroke width must be a non-negative number, got {}",
            stroke_width
        )));
    }
    Ok(stroke_width)
}
