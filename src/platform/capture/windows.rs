// Win32 GDI backend for virtual-screen capture

use std::ffi::c_void;

use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, HBITMAP, HDC,
    HGDIOBJ, SRCCOPY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN,
};

use super::gdi::{self, Bitmap, DeviceContext, GdiApi, GdiObject};
use crate::core::convert::BitmapLayout;
use crate::models::capture::{CaptureResult, CapturedImage, ScreenGeometry};

fn hdc(dc: DeviceContext) -> HDC {
    HDC(dc.0 as *mut c_void)
}

fn hbitmap(bitmap: Bitmap) -> HBITMAP {
    HBITMAP(bitmap.0 as *mut c_void)
}

fn hgdiobj(object: GdiObject) -> HGDIOBJ {
    HGDIOBJ(object.0 as *mut c_void)
}

/// The capture primitives implemented over the real Win32 GDI calls.
pub struct Win32Gdi;

impl GdiApi for Win32Gdi {
    fn virtual_screen(&self) -> ScreenGeometry {
        // GetSystemMetrics never fails; it reports zero when the metric
        // is unavailable, which callers pass through as-is.
        unsafe {
            ScreenGeometry {
                x: GetSystemMetrics(SM_XVIRTUALSCREEN),
                y: GetSystemMetrics(SM_YVIRTUALSCREEN),
                width: GetSystemMetrics(SM_CXVIRTUALSCREEN),
                height: GetSystemMetrics(SM_CYVIRTUALSCREEN),
            }
        }
    }

    fn desktop_dc(&self) -> Option<DeviceContext> {
        let dc = unsafe { GetDC(None) };
        if dc.is_invalid() {
            return None;
        }
        Some(DeviceContext(dc.0 as isize))
    }

    fn release_desktop_dc(&self, dc: DeviceContext) {
        let _ = unsafe { ReleaseDC(None, hdc(dc)) };
    }

    fn create_memory_dc(&self, desktop: DeviceContext) -> Option<DeviceContext> {
        let dc = unsafe { CreateCompatibleDC(hdc(desktop)) };
        if dc.is_invalid() {
            return None;
        }
        Some(DeviceContext(dc.0 as isize))
    }

    fn delete_memory_dc(&self, dc: DeviceContext) {
        let _ = unsafe { DeleteDC(hdc(dc)) };
    }

    fn create_bitmap(&self, desktop: DeviceContext, width: i32, height: i32) -> Option<Bitmap> {
        let bitmap = unsafe { CreateCompatibleBitmap(hdc(desktop), width, height) };
        if bitmap.is_invalid() {
            return None;
        }
        Some(Bitmap(bitmap.0 as isize))
    }

    fn delete_bitmap(&self, bitmap: Bitmap) {
        let _ = unsafe { DeleteObject(hbitmap(bitmap)) };
    }

    fn select_bitmap(&self, dc: DeviceContext, bitmap: Bitmap) -> Option<GdiObject> {
        let previous = unsafe { SelectObject(hdc(dc), hbitmap(bitmap)) };
        if previous.is_invalid() {
            return None;
        }
        Some(GdiObject(previous.0 as isize))
    }

    fn restore_object(&self, dc: DeviceContext, previous: GdiObject) {
        let _ = unsafe { SelectObject(hdc(dc), hgdiobj(previous)) };
    }

    fn blit(&self, dest: DeviceContext, src: DeviceContext, geometry: &ScreenGeometry) -> bool {
        // Read from the virtual-screen origin, which can be negative when
        // a monitor sits left of or above the primary one.
        unsafe {
            BitBlt(
                hdc(dest),
                0,
                0,
                geometry.width,
                geometry.height,
                hdc(src),
                geometry.x,
                geometry.y,
                SRCCOPY,
            )
            .is_ok()
        }
    }

    fn read_bits(
        &self,
        desktop: DeviceContext,
        bitmap: Bitmap,
        layout: &BitmapLayout,
        out: &mut [u8],
    ) -> i32 {
        let mut bitmap_info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: layout.width,
                biHeight: -layout.height, // negative for top-down rows
                biPlanes: 1,
                biBitCount: layout.bits_per_pixel,
                biCompression: BI_RGB.0 as u32,
                ..Default::default()
            },
            ..Default::default()
        };

        unsafe {
            GetDIBits(
                hdc(desktop),
                hbitmap(bitmap),
                0,
                layout.height.max(0) as u32,
                Some(out.as_mut_ptr() as *mut c_void),
                &mut bitmap_info,
                DIB_RGB_COLORS,
            )
        }
    }
}

/// Windows virtual-screen capture over the GDI BitBlt path.
pub struct WindowsScreenCapture;

impl WindowsScreenCapture {
    /// Query the virtual-screen bounding rectangle.
    pub fn virtual_screen() -> ScreenGeometry {
        Win32Gdi.virtual_screen()
    }

    /// Capture one still frame of the entire virtual screen.
    pub fn capture_frame() -> CaptureResult<CapturedImage> {
        gdi::capture_with(&Win32Gdi)
    }
}
