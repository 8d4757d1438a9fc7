// GDI capture sequence, generalized over the primitive set that runs it

use tracing::debug;

use crate::core::convert::{BgrxView, BitmapLayout};
use crate::models::capture::{CaptureError, CaptureResult, CapturedImage, ScreenGeometry};

/// Opaque device-context handle (desktop or memory-backed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceContext(pub isize);

/// Opaque bitmap handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap(pub isize);

/// Opaque handle to the object a surface had selected before us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GdiObject(pub isize);

/// The GDI primitives the capture sequence is written against.
///
/// The Windows backend implements this one-to-one over Win32 calls; tests
/// implement it with a scripted recorder to drive error mapping and
/// release ordering without a desktop.
pub trait GdiApi {
    /// Virtual-screen bounding rectangle. Never fails; hosts without the
    /// metric report zeroes, which are passed through unmodified.
    fn virtual_screen(&self) -> ScreenGeometry;

    /// Acquire a device context for the whole desktop.
    fn desktop_dc(&self) -> Option<DeviceContext>;
    fn release_desktop_dc(&self, dc: DeviceContext);

    /// Create an off-screen device context compatible with the desktop.
    fn create_memory_dc(&self, desktop: DeviceContext) -> Option<DeviceContext>;
    fn delete_memory_dc(&self, dc: DeviceContext);

    /// Create a bitmap compatible with the desktop device context.
    fn create_bitmap(&self, desktop: DeviceContext, width: i32, height: i32) -> Option<Bitmap>;
    fn delete_bitmap(&self, bitmap: Bitmap);

    /// Select `bitmap` into `dc`, returning the previously selected object.
    fn select_bitmap(&self, dc: DeviceContext, bitmap: Bitmap) -> Option<GdiObject>;
    fn restore_object(&self, dc: DeviceContext, previous: GdiObject);

    /// Block-copy (width, height) pixels from the virtual-screen origin in
    /// `src` into `dest` at (0, 0).
    fn blit(&self, dest: DeviceContext, src: DeviceContext, geometry: &ScreenGeometry) -> bool;

    /// Read the raw pixels of `bitmap` into `out` per `layout`. Returns
    /// the number of scan lines transferred.
    fn read_bits(
        &self,
        desktop: DeviceContext,
        bitmap: Bitmap,
        layout: &BitmapLayout,
        out: &mut [u8],
    ) -> i32;
}

// One guard per acquired handle. Locals drop in reverse declaration
// order, which is exactly the reverse-acquisition release order the
// cleanup contract requires on every exit path.

struct DesktopDc<'a, G: GdiApi> {
    gdi: &'a G,
    handle: DeviceContext,
}

impl<'a, G: GdiApi> DesktopDc<'a, G> {
    fn acquire(gdi: &'a G) -> Option<Self> {
        gdi.desktop_dc().map(|handle| Self { gdi, handle })
    }
}

impl<G: GdiApi> Drop for DesktopDc<'_, G> {
    fn drop(&mut self) {
        self.gdi.release_desktop_dc(self.handle);
    }
}

struct MemoryDc<'a, G: GdiApi> {
    gdi: &'a G,
    handle: DeviceContext,
}

impl<'a, G: GdiApi> MemoryDc<'a, G> {
    fn create(gdi: &'a G, desktop: DeviceContext) -> Option<Self> {
        gdi.create_memory_dc(desktop)
            .map(|handle| Self { gdi, handle })
    }
}

impl<G: GdiApi> Drop for MemoryDc<'_, G> {
    fn drop(&mut self) {
        self.gdi.delete_memory_dc(self.handle);
    }
}

struct CaptureBitmap<'a, G: GdiApi> {
    gdi: &'a G,
    handle: Bitmap,
}

impl<'a, G: GdiApi> CaptureBitmap<'a, G> {
    fn create(gdi: &'a G, desktop: DeviceContext, width: i32, height: i32) -> Option<Self> {
        gdi.create_bitmap(desktop, width, height)
            .map(|handle| Self { gdi, handle })
    }
}

impl<G: GdiApi> Drop for CaptureBitmap<'_, G> {
    fn drop(&mut self) {
        self.gdi.delete_bitmap(self.handle);
    }
}

struct Selected<'a, G: GdiApi> {
    gdi: &'a G,
    dc: DeviceContext,
    previous: GdiObject,
}

impl<'a, G: GdiApi> Selected<'a, G> {
    fn select(gdi: &'a G, dc: DeviceContext, bitmap: Bitmap) -> Option<Self> {
        gdi.select_bitmap(dc, bitmap)
            .map(|previous| Self { gdi, dc, previous })
    }
}

impl<G: GdiApi> Drop for Selected<'_, G> {
    fn drop(&mut self) {
        self.gdi.restore_object(self.dc, self.previous);
    }
}

/// Capture one still frame of the virtual screen through `gdi`.
///
/// Runs the full acquisition sequence: desktop DC, compatible memory DC,
/// compatible bitmap, selection, blit, readback, BGRX -> RGBA conversion.
/// Every acquired handle is released exactly once, in reverse acquisition
/// order, on success and on every failure path.
pub fn capture_with<G: GdiApi>(gdi: &G) -> CaptureResult<CapturedImage> {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let geometry = gdi.virtual_screen();
    debug!(?geometry, "capturing virtual screen");

    let desktop =
        DesktopDc::acquire(gdi).ok_or(CaptureError::DeviceAcquisitionFailed("GetDC"))?;
    let memory = MemoryDc::create(gdi, desktop.handle)
        .ok_or(CaptureError::SurfaceCreationFailed("CreateCompatibleDC"))?;
    let bitmap = CaptureBitmap::create(gdi, desktop.handle, geometry.width, geometry.height)
        .ok_or(CaptureError::BufferAllocationFailed("CreateCompatibleBitmap"))?;

    let layout = BitmapLayout::top_down(geometry.width, geometry.height);
    let mut raw = vec![0u8; layout.buffer_len()];

    let _selected = Selected::select(gdi, memory.handle, bitmap.handle)
        .ok_or(CaptureError::SelectionFailed("SelectObject"))?;

    if !gdi.blit(memory.handle, desktop.handle, &geometry) {
        return Err(CaptureError::BlitFailed("BitBlt"));
    }

    let lines = gdi.read_bits(desktop.handle, bitmap.handle, &layout, &mut raw);
    if lines == 0 {
        return Err(CaptureError::ReadbackFailed("GetDIBits"));
    }

    let view = BgrxView::new(&raw, &layout)
        .ok_or(CaptureError::ReadbackFailed("readback buffer shorter than layout"))?;
    let (width, height) = (view.width() as u32, view.height() as u32);
    let data = view.to_rgba();

    debug!(width, height, bytes = data.len(), "virtual screen captured");

    Ok(CapturedImage {
        timestamp,
        width,
        height,
        data,
    })
}
