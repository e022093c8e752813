// ABOUTME: Library module for the slideshot program.
// ABOUTME: Contains the browser session, styling, export and preview functionality.

// Reexport modules
pub mod browser;
pub mod config;
pub mod errors;
pub mod export;
pub mod font;
pub mod preview;
pub mod settle;
pub mod utils;
pub mod viewport;

// Reexport common types and functions
pub use browser::{BrowserSession, SessionMode};
pub use config::Config;
pub use errors::{Result, SlideshotError};
pub use export::{ExportRequest, OutputArtifact, export_slides, output_dir_for, slide_file_name};
pub use font::FontSpec;
pub use preview::{PreviewRequest, preview_page};
pub use settle::SettlePolicy;
pub use viewport::{ViewportSize, parse_size};
