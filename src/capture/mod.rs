//! Screen capture domain — public API.
//!
//! The pipeline sees capture through the `CaptureSource` trait: a blocking
//! call that either yields a frame or nothing. No partial or corrupt frame
//! is distinguished — any OS-level failure is logged where it happens and
//! surfaces as `None`.

pub mod codec;
mod screenshot;

pub use screenshot::XcapCaptureSource;

use image::DynamicImage;

/// Metadata of the monitor a frame was grabbed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorInfo {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// One captured frame. Transient — owned by the pipeline invocation that
/// requested it and never persisted.
pub struct CaptureResult {
    pub image: DynamicImage,
    pub monitor: MonitorInfo,
}

/// Produces a raster image of the display.
///
/// Blocking; callers reach it from async code via `spawn_blocking`.
pub trait CaptureSource: Send + Sync {
    fn capture(&self) -> Option<CaptureResult>;
}
