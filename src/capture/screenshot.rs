//! Full-screen capture using the `xcap` crate.
//!
//! This is the infrastructure layer — it talks to the OS. Errors are
//! logged here and flattened to `None` at the trait boundary; the rest of
//! the app never sees platform detail.

use super::{CaptureResult, CaptureSource, MonitorInfo};
use image::DynamicImage;
use xcap::Monitor;

/// Grabs the primary monitor through `xcap`.
pub struct XcapCaptureSource;

impl CaptureSource for XcapCaptureSource {
    fn capture(&self) -> Option<CaptureResult> {
        let start = std::time::Instant::now();
        match capture_primary_monitor() {
            Ok(result) => {
                log::info!(
                    "[CAPTURE] Grabbed {}x{} frame from '{}' in {}ms",
                    result.monitor.width,
                    result.monitor.height,
                    result.monitor.name,
                    start.elapsed().as_millis()
                );
                Some(result)
            }
            Err(e) => {
                log::error!("[CAPTURE] {}", e);
                None
            }
        }
    }
}

/// Captures the primary monitor's screen, with its metadata.
///
/// Falls back to the first monitor if none reports as primary.
fn capture_primary_monitor() -> Result<CaptureResult, ScreenshotError> {
    let monitors =
        Monitor::all().map_err(|e| ScreenshotError::MonitorEnumeration(e.to_string()))?;

    let monitor = monitors
        .into_iter()
        .find(|m| m.is_primary().unwrap_or(false))
        .or_else(|| {
            let all = Monitor::all().ok()?;
            all.into_iter().next()
        })
        .ok_or(ScreenshotError::NoMonitor)?;

    let info = MonitorInfo {
        name: monitor.name().unwrap_or_else(|_| "unknown".to_string()),
        width: monitor.width().unwrap_or(0),
        height: monitor.height().unwrap_or(0),
    };

    let image = monitor
        .capture_image()
        .map_err(|e| ScreenshotError::CaptureFailed(e.to_string()))?;

    Ok(CaptureResult {
        image: DynamicImage::ImageRgba8(image),
        monitor: info,
    })
}

#[derive(Debug, thiserror::Error)]
enum ScreenshotError {
    #[error("Failed to enumerate monitors: {0}")]
    MonitorEnumeration(String),

    #[error("No monitor available to capture")]
    NoMonitor,

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),
}
