// Pixel-layout arithmetic and BGRX -> RGBA conversion

/// Memory layout of a readback bitmap: top-down rows, uncompressed.
///
/// `stride` follows the DIB alignment rule: every scan line starts on a
/// 4-byte boundary regardless of the pixel width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapLayout {
    pub width: i32,
    pub height: i32,
    pub bits_per_pixel: u16,
}

impl BitmapLayout {
    /// 32-bit top-down layout for a capture of the given extent.
    pub fn top_down(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            bits_per_pixel: 32,
        }
    }

    /// Bytes per scan line, rounded up to a 4-byte boundary.
    ///
    /// Degenerate (zero or negative) widths yield a zero stride.
    pub fn stride(&self) -> usize {
        if self.width <= 0 {
            return 0;
        }
        let bits = self.width as i64 * self.bits_per_pixel as i64;
        ((bits + 31) / 32 * 4) as usize
    }

    /// Total byte length of the backing buffer for this layout.
    pub fn buffer_len(&self) -> usize {
        if self.height <= 0 {
            return 0;
        }
        self.stride() * self.height as usize
    }
}

/// Bounds-checked read-only view over raw 32-bit BGRX pixel memory.
///
/// Construction validates the buffer against the declared layout, so the
/// conversion loop never indexes past the buffer no matter what stride the
/// layout claims.
pub struct BgrxView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> BgrxView<'a> {
    /// Wrap `data` as BGRX pixels described by `layout`.
    ///
    /// Returns `None` when the layout is not 32 bits per pixel or the
    /// buffer is shorter than the layout declares.
    pub fn new(data: &'a [u8], layout: &BitmapLayout) -> Option<Self> {
        if layout.bits_per_pixel != 32 {
            return None;
        }
        if data.len() < layout.buffer_len() {
            return None;
        }
        Some(Self {
            data,
            width: layout.width.max(0) as usize,
            height: layout.height.max(0) as usize,
            stride: layout.stride(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Re-emit every pixel as RGBA with the alpha byte forced to 255.
    ///
    /// The source pad byte carries no transparency information, so it is
    /// dropped rather than copied.
    pub fn to_rgba(&self) -> Vec<u8> {
        if self.width == 0 || self.height == 0 {
            return Vec::new();
        }

        let mut rgba = Vec::with_capacity(self.width * self.height * 4);
        for row in self.data.chunks_exact(self.stride).take(self.height) {
            for px in row[..self.width * 4].chunks_exact(4) {
                rgba.push(px[2]); // R
                rgba.push(px[1]); // G
                rgba.push(px[0]); // B
                rgba.push(255);
            }
        }
        rgba
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_width_times_four_at_32bpp() {
        assert_eq!(BitmapLayout::top_down(1, 1).stride(), 4);
        assert_eq!(BitmapLayout::top_down(3, 1).stride(), 12);
        assert_eq!(BitmapLayout::top_down(1920, 1080).stride(), 1920 * 4);
    }

    #[test]
    fn stride_rounds_up_to_four_byte_boundary() {
        // 24 bpp: one pixel is 3 bytes but the row still occupies 4.
        let layout = BitmapLayout {
            width: 1,
            height: 1,
            bits_per_pixel: 24,
        };
        assert_eq!(layout.stride(), 4);

        let layout = BitmapLayout {
            width: 3,
            height: 1,
            bits_per_pixel: 24,
        };
        assert_eq!(layout.stride(), 12);
    }

    #[test]
    fn degenerate_extents_yield_empty_buffer() {
        assert_eq!(BitmapLayout::top_down(0, 100).buffer_len(), 0);
        assert_eq!(BitmapLayout::top_down(100, 0).buffer_len(), 0);
        assert_eq!(BitmapLayout::top_down(-5, -5).buffer_len(), 0);
        assert_eq!(BitmapLayout::top_down(-5, 10).stride(), 0);
    }

    #[test]
    fn converts_bgrx_to_rgba_with_opaque_alpha() {
        let layout = BitmapLayout::top_down(2, 1);
        let raw = [10u8, 20, 30, 0, 40, 50, 60, 7];
        let view = BgrxView::new(&raw, &layout).expect("valid view");

        assert_eq!(view.to_rgba(), vec![30, 20, 10, 255, 60, 50, 40, 255]);
    }

    #[test]
    fn ignores_bytes_beyond_declared_layout() {
        let layout = BitmapLayout::top_down(1, 2);
        let raw = [1u8, 2, 3, 0, 4, 5, 6, 0, 99, 99];
        let view = BgrxView::new(&raw, &layout).expect("valid view");
        assert_eq!(view.to_rgba(), vec![3, 2, 1, 255, 6, 5, 4, 255]);
    }

    #[test]
    fn rejects_short_buffer() {
        let layout = BitmapLayout::top_down(2, 2);
        let raw = [0u8; 15]; // needs 16
        assert!(BgrxView::new(&raw, &layout).is_none());
    }

    #[test]
    fn rejects_unsupported_bit_depth() {
        let layout = BitmapLayout {
            width: 2,
            height: 2,
            bits_per_pixel: 24,
        };
        let raw = [0u8; 64];
        assert!(BgrxView::new(&raw, &layout).is_none());
    }

    #[test]
    fn zero_sized_view_converts_to_empty_buffer() {
        let layout = BitmapLayout::top_down(0, 0);
        let view = BgrxView::new(&[], &layout).expect("empty view is valid");
        assert!(view.to_rgba().is_empty());
    }
}
