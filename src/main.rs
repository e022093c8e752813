// ABOUTME: Main entry point for the slideshot program.
// ABOUTME: Provides CLI interface and maps library errors to exit codes.

use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  slideshot page.html                          # 1500x2000 with the bundled font
  slideshot page.html --size 1080x1080         # custom viewport
  slideshot page.html --scale 1.5              # zoom page content to 150%
  slideshot page.html --scale 0.8              # shrink page content to 80%
  slideshot page.html --font path/to/font.ttf  # use another font file
  slideshot page.html --stroke 0.5             # weight +0.5px
  slideshot page.html --preview                # open a browser window instead
  slideshot page.html --preview --stroke 0.5 --scale 1.2";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Export the .slide elements of an HTML page as JPEG images",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Path to the local HTML file
    html_file: PathBuf,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, value_name = "WIDTHxHEIGHT", default_value = "1500x2000", value_parser = parse_size)]
    size: slideshot::ViewportSize,

    /// Page zoom (CSS zoom), like Ctrl +/- in a browser
    #[arg(long, default_value_t = 1.0, value_parser = parse_scale)]
    scale: f64,

    /// JPEG quality
    #[arg(long, value_name = "1-100", default_value_t = slideshot::config::DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Custom font file, defaults to the bundled font
    #[arg(long, value_name = "FONT_PATH")]
    font: Option<PathBuf>,

    /// Text stroke width in px, used to thicken the font (e.g. 0.5, 1.0)
    #[arg(long, value_name = "PX", default_value_t = 0.0, value_parser = parse_stroke)]
    stroke: f64,

    /// Open a browser window to check the styling instead of exporting
    #[arg(long)]
    preview: bool,
}

fn parse_size(s: &str) -> Result<slideshot::ViewportSize, String> {
    slideshot::parse_size(s).map_err(|e| e.to_string())
}

fn parse_scale(s: &str) -> Result<f64, String> {
    let scale: f64 = s.parse().map_err(|e| format!("invalid scale '{}': {}", s, e))?;
    slideshot::export::validate_scale(scale).map_err(|e| e.to_string())
}

fn parse_stroke(s: &str) -> Result<f64, String> {
    let stroke: f64 = s.parse().map_err(|e| format!("invalid stroke '{}': {}", s, e))?;
    slideshot::font::validate_stroke(stroke).map_err(|e| e.to_string())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = slideshot::Config::from_env();
    let font = config.font_spec(cli.font, cli.stroke);

    let result = if cli.preview {
        let request = slideshot::PreviewRequest {
            html_file: cli.html_file,
            viewport: cli.size,
            scale: cli.scale,
            font,
        };
        let stdin = std::io::stdin();
        slideshot::preview_page(&request, &config, &mut stdin.lock())
    } else {
        let request = slideshot::ExportRequest {
            html_file: cli.html_file,
            viewport: cli.size,
            scale: cli.scale,
            quality: cli.quality,
            font,
        };
        slideshot::export_slides(&request, &config).map(|_| ())
    };

    if let Err(e) = result {
        if e.is_missing_file() {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("Export failed: {}", e);
        }
        std::process::exit(1);
    }
}
