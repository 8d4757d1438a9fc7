// Stand-in for hosts without a supported capture backend

use crate::models::capture::{CaptureError, CaptureResult, CapturedImage, ScreenGeometry};

/// Placeholder capture backend for platforms without GDI.
pub struct UnsupportedScreenCapture;

impl UnsupportedScreenCapture {
    /// Virtual-screen metrics are unavailable here; report zeroes, the
    /// same policy the OS query uses for unsupported metrics.
    pub fn virtual_screen() -> ScreenGeometry {
        ScreenGeometry {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        }
    }

    pub fn capture_frame() -> CaptureResult<CapturedImage> {
        Err(CaptureError::NotSupported)
    }
}
