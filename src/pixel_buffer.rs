//! The 25-pixel frame that the matrix driver serializes.

use crate::{Digit, LED_COUNT, glyph_for};
use smart_leds::RGB8;

/// RGB color representation re-exported from `smart_leds`.
///
/// Channel order on the wire is a [`MatrixDriver`](crate::MatrixDriver) concern; a pixel is just
/// three intensities.
pub type Rgb = RGB8;

const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Fixed frame of [`LED_COUNT`] pixels, row-major over the 5×5 grid.
///
/// Indexes past 24 are a caller bug. Debug builds panic; release builds ignore the write (or
/// read back black).
///
/// ```
/// use digit_matrix::{Digit, PixelBuffer, Rgb, glyph_for};
///
/// let mut buffer = PixelBuffer::new();
/// let green = Rgb::new(0, 50, 0);
/// buffer.render_digit(Digit::new(3).expect("3 is a digit"), green);
///
/// for (index, on) in glyph_for(3).cells().enumerate() {
///     let expected = if on { green } else { Rgb::default() };
///     assert_eq!(buffer.get(index), expected);
/// }
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PixelBuffer {
    pixels: [Rgb; LED_COUNT],
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelBuffer {
    /// All pixels off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pixels: [BLACK; LED_COUNT],
        }
    }

    pub fn set(&mut self, index: usize, r: u8, g: u8, b: u8) {
        debug_assert!(index < LED_COUNT, "pixel index {index} out of range");
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = Rgb::new(r, g, b);
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Rgb {
        debug_assert!(index < LED_COUNT, "pixel index {index} out of range");
        self.pixels.get(index).copied().unwrap_or(BLACK)
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pixels = [BLACK; LED_COUNT];
    }

    /// Clears, then lights the digit's glyph cells in `color`.
    ///
    /// Clearing first means no pixel from the previous frame survives.
    pub fn render_digit(&mut self, digit: Digit, color: Rgb) {
        self.clear();
        let glyph = glyph_for(digit.value());
        for (pixel, on) in self.pixels.iter_mut().zip(glyph.cells()) {
            if on {
                *pixel = color;
            }
        }
    }

    /// The frame in LED index order.
    #[must_use]
    pub const fn pixels(&self) -> &[Rgb; LED_COUNT] {
        &self.pixels
    }

    /// True when every pixel is off.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.pixels.iter().all(|pixel| *pixel == BLACK)
    }
}
