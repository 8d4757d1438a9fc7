// Virtual-screen capture into in-memory RGBA pixel buffers.
//
// The one exposed operation is `capture()`: query the virtual-screen
// bounding rectangle, blit the visible framebuffer into an off-screen
// bitmap, read the raw pixels back, and convert them from the OS-native
// BGRX layout into top-down RGBA with opaque alpha. Serializing the
// result to a file format is a caller concern (see demos/grab.rs).

pub mod core;
pub mod models;
pub mod platform;

pub use crate::core::capturer::{capture, ScreenCapturer};
pub use crate::models::capture::{CaptureError, CaptureResult, CapturedImage, ScreenGeometry};
