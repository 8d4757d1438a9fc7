// Public capture surface - one still frame of the virtual screen

use tracing::warn;

use crate::models::capture::{CaptureResult, CapturedImage, ScreenGeometry};
use crate::platform::capture::PlatformCapture;

/// Captures the virtual-screen contents into an RGBA pixel buffer.
///
/// Stateless and synchronous: every call queries geometry fresh and
/// acquires its own OS resources, so independent captures may run from
/// multiple threads without sharing anything.
pub struct ScreenCapturer;

impl ScreenCapturer {
    pub fn new() -> Self {
        Self
    }

    /// Current virtual-screen bounding rectangle. Never fails; hosts
    /// without the metric report zeroes.
    pub fn geometry(&self) -> ScreenGeometry {
        let geometry = PlatformCapture::virtual_screen();
        if geometry.is_empty() {
            warn!(?geometry, "virtual screen reports a degenerate extent");
        }
        geometry
    }

    /// Capture one still frame of the entire virtual screen.
    ///
    /// Blocks until the OS copy completes; the first failing OS primitive
    /// is returned as the matching `CaptureError` kind, with all
    /// partially acquired resources already released.
    pub fn capture(&self) -> CaptureResult<CapturedImage> {
        PlatformCapture::capture_frame()
    }
}

impl Default for ScreenCapturer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper around [`ScreenCapturer::capture`].
pub fn capture() -> CaptureResult<CapturedImage> {
    ScreenCapturer::new().capture()
}
