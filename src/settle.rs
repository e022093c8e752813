// ABOUTME: Layout settle waits for the slideshot application
// ABOUTME: Polls a page probe until it stops changing, with a timer ceiling as fallback

use crate::errors::{Result, SlideshotError};
use log::debug;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Resource count once the document has finished loading.
pub const NETWORK_PROBE: &str = "document.readyState === 'complete' \
    ? performance.getEntriesByType('resource').length : null";

/// Scrollable document size, which changes while zoom reflows the layout.
pub const LAYOUT_PROBE: &str = "document.readyState === 'complete' \
    ? document.documentElement.scrollWidth + 'x' + document.documentElement.scrollHeight \
    : null";

/// Requests `family` and reports the face count once it is usable.
///
/// `document.fonts.status` alone reads `loaded` before the injected face starts
/// loading, so the probe asks for the family explicitly.
pub fn font_probe(family: &str) -> Result<String> {
    let escaped = family.replace('\\', "\\\\").replace('\'', "\\'");
    let font = js_string(&format!("1em '{}'", escaped))?;
    Ok(format!(
        "(document.fonts.load({font}), \
         document.fonts.status === 'loaded' && document.fonts.check({font}) \
         ? document.fonts.size : null)",
        font = font
    ))
}

/// Viewport position of the slide at `index`.
///
/// Moves while any scroll container holding the slide is still scrolling, not just
/// the window.
pub fn slide_position_probe(selector: &str, index: usize) -> Result<String> {
    Ok(format!(
        r#"(function(index) {{
            var el = document.querySelectorAll({})[index];
            if (!el) return null;
            var r = el.getBoundingClientRect();
            return r.left + ',' + r.top;
        }})({})"#,
        js_string(selector)?,
        index
    ))
}

/// Encode `s` as a JavaScript string literal
pub fn js_string(s: &str) -> Result<String> {
    serde_json::to_string(s)
        .map_err(|e| SlideshotError::UnknownError(format!("Failed to encode script string: {}", e)))
}

/// How long to poll a probe before giving up and moving on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePolicy {
    /// Delay between two probe reads
    pub interval: Duration,
    /// The probe value must stay unchanged for this long
    pub quiet: Duration,
    /// Upper bound on the whole wait
    pub ceiling: Duration,
}

impl SettlePolicy {
    pub const fn new(interval_ms: u64, quiet_ms: u64, ceiling_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            quiet: Duration::from_millis(quiet_ms),
            ceiling: Duration::from_millis(ceiling_ms),
        }
    }

    /// Network idle: no new resource entries for 500ms.
    pub fn network(timeout: Duration) -> Self {
        Self {
            interval: Duration::from_millis(100),
            quiet: Duration::from_millis(500),
            ceiling: timeout,
        }
    }

    pub const FONT: SettlePolicy = SettlePolicy::new(25, 50, 200);
    pub const ZOOM: SettlePolicy = SettlePolicy::new(25, 50, 100);
    pub const SCROLL: SettlePolicy = SettlePolicy::new(25, 50, 150);
}

/// Poll `probe` until it returns the same non-null value for `policy.quiet`.
///
/// Returns `Ok(true)` when the value settled and `Ok(false)` when the ceiling was hit
/// first. Probe errors are propagated.
pub fn wait_until_stable<F>(mut probe: F, policy: &SettlePolicy) -> Result<bool>
where
    F: FnMut() -> Result<Option<Value>>,
{
    let start = Instant::now();
    let mut last: Option<(Value, Instant)> = None;

    loop {
        let now = Instant::now();
        match probe()? {
            Some(value) if !value.is_null() => match &last {
                Some((previous, since)) if *previous == value => {
                    if now.duration_since(*since) >= policy.quiet {
                        debug!("Settled on {} after {:?}", value, start.elapsed());
                        return Ok(true);
                    }
                }
                _ => last = Some((value, now)),
            },
            _ => last = None,
        }

        if start.elapsed() >= policy.ceiling {
            debug!("Settle ceiling of {:?} reached", policy.ceiling);
            return Ok(false);
        }

        std::thread::sleep(policy.interval);
    }
}
