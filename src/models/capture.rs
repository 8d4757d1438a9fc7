// Data structures for virtual-screen capture

use serde::{Deserialize, Serialize};

/// Bounding rectangle of the virtual screen (all monitors combined).
///
/// Origin can be negative when a secondary monitor sits left of or above
/// the primary one. Queried fresh for every capture; never cached, since
/// geometry changes under monitor hot-plug or resolution switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenGeometry {
    /// True when the reported extent cannot contain a single pixel.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// A captured still frame of the virtual screen.
///
/// Pixels are RGBA8 in row-major, top-to-bottom order with the alpha byte
/// forced to 255. `data.len()` is always `width * height * 4`.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub timestamp: i64,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl CapturedImage {
    /// Convert into an `image::RgbaImage`, consuming the frame.
    ///
    /// Returns `None` only if the buffer-length invariant is broken.
    pub fn into_rgba_image(self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
    }
}

/// Error types for screen capture operations.
///
/// One variant per OS primitive that can fail, in acquisition order. The
/// payload names the OS call that reported the failure.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Failed to acquire desktop device context: {0}")]
    DeviceAcquisitionFailed(&'static str),

    #[error("Failed to create off-screen surface: {0}")]
    SurfaceCreationFailed(&'static str),

    #[error("Failed to allocate capture bitmap: {0}")]
    BufferAllocationFailed(&'static str),

    #[error("Failed to select capture bitmap into surface: {0}")]
    SelectionFailed(&'static str),

    #[error("Screen block-copy failed: {0}")]
    BlitFailed(&'static str),

    #[error("Pixel readback transferred zero scan lines: {0}")]
    ReadbackFailed(&'static str),

    #[error("Not supported on this platform")]
    NotSupported,
}

pub type CaptureResult<T> = Result<T, CaptureError>;
