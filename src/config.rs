// ABOUTME: Configuration module for the slideshot application
// ABOUTME: Provides default settings and environment variable handling

use crate::font::FontSpec;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_WIDTH: u32 = 1500;
pub const DEFAULT_HEIGHT: u32 = 2000;
pub const DEFAULT_QUALITY: u8 = 90;
pub const DEFAULT_FONT_FAMILY: &str = "STKaiti";
pub const DEFAULT_FONT_FILE: &str = "STKaiti.ttf";
pub const FONT_DIR_NAME: &str = "Fonts";
pub const SLIDE_SELECTOR: &str = ".slide";
pub const OUTPUT_PREFIX: &str = "slide";
pub const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// Global configuration for the application, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub browser_path: Option<String>,
    pub default_timeout_ms: u64,
    pub default_font_path: PathBuf,
    pub default_font_family: String,
    pub sandbox: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_path: None,
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            default_font_path: bundled_font_path(),
            default_font_family: DEFAULT_FONT_FAMILY.to_string(),
            sandbox: true,
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let browser_path = env::var("BROWSER_PATH").ok().filter(|s| !s.is_empty());
        let default_timeout_ms = env::var("DEFAULT_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        let default_font_path = env::var("SLIDESHOT_FONT_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(bundled_font_path);
        let default_font_family = env::var("SLIDESHOT_FONT_FAMILY")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string());
        let sandbox = env::var("SLIDESHOT_NO_SANDBOX")
            .ok()
            .map(|s| matches!(s.to_lowercase().as_str(), "" | "0" | "false"))
            .unwrap_or(true);

        Self {
            browser_path,
            default_timeout_ms,
            default_font_path,
            default_font_family,
            sandbox,
        }
    }

    /// Network idle ceiling used while waiting for the page to load
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    /// Build a font specification, falling back to the bundled font when no override is given
    pub fn font_spec(&self, font_path: Option<PathBuf>, stroke_width: f64) -> FontSpec {
        FontSpec {
            file_path: Some(font_path.unwrap_or_else(|| self.default_font_path.clone())),
            family: self.default_font_family.clone(),
            stroke_width,
        }
    }
}

/// Location of the font shipped next to the executable.
fn bundled_font_path() -> PathBuf {
    let base = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(FONT_DIR_NAME).join(DEFAULT_FONT_FILE)
}
