// ABOUTME: Browser session module for the slideshot application
// ABOUTME: Launches Chrome, loads the HTML page and applies font and zoom styling

use crate::config::{Config, SLIDE_SELECTOR};
use crate::errors::{Result, SlideshotError};
use crate::font::FontSpec;
use crate::settle::{self, SettlePolicy};
use crate::utils;
use crate::viewport::ViewportSize;
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::{Emulation, Page};
use headless_chrome::{Browser, LaunchOptionsBuilder};
use log::{debug, info, warn};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Preview windows may stay open for as long as the operator likes.
const PREVIEW_IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Whether the browser window is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Headless,
    Visible,
}

/// One browser process with a single tab, owned for the duration of an operation.
///
/// Dropping the session kills the Chrome process, so every exit path releases it.
pub struct BrowserSession {
    tab: Arc<Tab>,
    // Kept alive for the tab; dropped after it.
    _browser: Browser,
    timeout: Duration,
}

impl BrowserSession {
    /// Launch Chrome with a page area of exactly `viewport` pixels
    pub fn launch(mode: SessionMode, viewport: ViewportSize, config: &Config) -> Result<Self> {
        let mut launch_options_builder = LaunchOptionsBuilder::default();

        launch_options_builder.window_size(Some((viewport.width, viewport.height)));
        launch_options_builder.headless(mode == SessionMode::Headless);
        launch_options_builder.sandbox(config.sandbox);

        if mode == SessionMode::Visible {
            launch_options_builder.idle_browser_timeout(PREVIEW_IDLE_TIMEOUT);
        }

        if let Some(browser_path) = &config.browser_path {
            launch_options_builder.path(Some(browser_path.into()));
        }

        let launch_options = launch_options_builder
            .build()
            .map_err(|e| SlideshotError::BrowserError {
                message: format!("Failed to build browser options: {:?}", e),
                source: None,
            })?;

        info!("Launching {:?} browser with viewport {}", mode, viewport);
        let browser = Browser::new(launch_options)
            .map_err(|e| SlideshotError::browser("Failed to launch browser", e))?;

        let tab = browser
            .new_tab()
            .map_err(|e| SlideshotError::browser("Failed to create new tab", e))?;

        // The window size includes browser chrome when visible; pin the page area.
        tab.call_method(device_metrics(viewport))
            .map_err(|e| SlideshotError::browser("Failed to set viewport size", e))?;

        Ok(Self {
            tab,
            _browser: browser,
            timeout: config.timeout(),
        })
    }

    /// Run the shared setup: load the page, inject the font and apply the zoom.
    pub fn prepare(&self, html_file: &Path, font: &FontSpec, scale: f64) -> Result<()> {
        self.open(html_file)?;
        self.inject_font(font)?;
        self.apply_zoom(scale)?;
        Ok(())
    }

    /// Navigate to a local HTML file and wait for the network to go idle
    pub fn open(&self, html_file: &Path) -> Result<()> {
        let absolute = utils::get_absolute_path(html_file)?;
        let url = utils::file_url(&absolute)?;

        info!("Opening page at URL: {}", url);
        self.tab
            .navigate_to(&url)
            .map_err(|e| SlideshotError::browser("Failed to navigate to HTML", e))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| SlideshotError::browser("Navigation failed", e))?;

        self.tab
            .wait_for_element_with_custom_timeout("body", self.timeout)
            .map_err(|e| SlideshotError::browser("Failed to wait for body element", e))?;

        if !self.settle(settle::NETWORK_PROBE, &SettlePolicy::network(self.timeout))? {
            warn!(
                "Network did not go idle within {:?}, continuing anyway",
                self.timeout
            );
        }
        Ok(())
    }

    /// Inject the custom font stylesheet.
    ///
    /// Returns `Ok(false)` when the font file is missing; the page then keeps its
    /// own fonts and no stroke is applied.
    pub fn inject_font(&self, font: &FontSpec) -> Result<bool> {
        let Some(font_file) = font.available_file() else {
            let shown = font
                .file_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<none>".to_string());
            warn!("Font file does not exist: {}", shown);
            println!("Warning: font file does not exist: {}", shown);
            return Ok(false);
        };

        let css = font.stylesheet(font_file)?;
        self.add_style_tag(&css)?;
        self.settle(&settle::font_probe(&font.family)?, &SettlePolicy::FONT)?;

        println!("Loaded font: {}", font.describe(font_file));
        Ok(true)
    }

    /// Zoom the whole document; the viewport itself keeps its pixel size
    pub fn apply_zoom(&self, scale: f64) -> Result<()> {
        if scale == 1.0 {
            return Ok(());
        }
        debug!("Applying zoom {}", scale);
        self.evaluate(&format!("document.body.style.zoom = {}", scale))?;
        self.settle(settle::LAYOUT_PROBE, &SettlePolicy::ZOOM)?;
        Ok(())
    }

    /// Append a `<style>` element holding `css` to the document
    pub fn add_style_tag(&self, css: &str) -> Result<()> {
        let css_literal = settle::js_string(css)?;
        let js = format!(
            r#"(function(css) {{
                var style = document.createElement('style');
                style.textContent = css;
                (document.head || document.documentElement).appendChild(style);
                return true;
            }})({})"#,
            css_literal
        );
        self.evaluate(&js)?;
        Ok(())
    }

    /// Number of slide elements currently in the document
    pub fn count_slides(&self) -> Result<usize> {
        let js = format!(
            "document.querySelectorAll({}).length",
            settle::js_string(SLIDE_SELECTOR)?
        );
        let count = self
            .evaluate(&js)?
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        Ok(count as usize)
    }

    /// Scroll the slide at `index` (document order) to the centre of the viewport
    pub fn scroll_slide_into_view(&self, index: usize) -> Result<()> {
        let js = format!(
            r#"(function(index) {{
                var el = document.querySelectorAll({})[index];
                if (!el) return false;
                el.scrollIntoView({{ block: 'center', inline: 'center' }});
                return true;
            }})({})"#,
            settle::js_string(SLIDE_SELECTOR)?,
            index
        );
        let found = self
            .evaluate(&js)?
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if !found {
            return Err(SlideshotError::BrowserError {
                message: format!("Slide {} is no longer in the document", index + 1),
                source: None,
            });
        }
        self.settle(
            &settle::slide_position_probe(SLIDE_SELECTOR, index)?,
            &SettlePolicy::SCROLL,
        )?;
        Ok(())
    }

    /// Capture the current viewport as JPEG
    pub fn capture_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(
                Page::CaptureScreenshotFormatOption::Jpeg,
                Some(u32::from(quality)),
                None,
                true,
            )
            .map_err(|e| SlideshotError::ScreenshotError(e.to_string()))
    }

    /// Evaluate a script in the page and return its value
    pub fn evaluate(&self, js: &str) -> Result<Option<Value>> {
        let result = self
            .tab
            .evaluate(js, false)
            .map_err(|e| SlideshotError::browser("Script evaluation failed", e))?;
        Ok(result.value)
    }

    /// Wait until `probe` stops changing, bounded by the policy ceiling
    pub fn settle(&self, probe: &str, policy: &SettlePolicy) -> Result<bool> {
        settle::wait_until_stable(|| self.evaluate(probe), policy)
    }

    /// Close the tab and shut the browser down
    pub fn close(self) {
        if let Err(e) = self.tab.close(true) {
            warn!("Failed to close tab cleanly: {}", e);
        }
        info!("Browser closed");
    }
}

/// Emulated page metrics giving exactly `viewport` CSS pixels at a 1:1 pixel ratio
pub fn device_metrics(viewport: ViewportSize) -> Emulation::SetDeviceMetricsOverride {
    Emulation::SetDeviceMetricsOverride {
        width: viewport.width,
        height: viewport.height,
        device_scale_factor: 1.0,
        mobile: false,
        scale: None,
        screen_width: None,
        screen_height: None,
        position_x: None,
        position_y: None,
        dont_set_visible_size: None,
        screen_orientation: None,
        viewport: None,
        display_feature: None,
        device_posture: None,
    }
}
