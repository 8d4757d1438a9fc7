// Platform-specific screen capture implementations
// Each platform module exposes the same surface as PlatformCapture

pub mod gdi;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::WindowsScreenCapture as PlatformCapture;

#[cfg(not(target_os = "windows"))]
pub mod unsupported;

#[cfg(not(target_os = "windows"))]
pub use unsupported::UnsupportedScreenCapture as PlatformCapture;
