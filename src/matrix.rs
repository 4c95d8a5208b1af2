//! Serializes the pixel buffer onto a WS2812 string.
//!
//! The string expects 24 bits per LED, **green, red, blue** order, most significant bit first,
//! back-to-back for every LED, then an idle gap of at least [`LATCH_DELAY_US`] before it commits
//! the frame. [`MatrixDriver::write`] does all of that; the bit timing itself belongs to the
//! [`WireChannel`] (on the RP2040, a PIO state machine, see `ws2812_pio`).

use embedded_hal_async::delay::DelayNs;

use crate::{Digit, LATCH_DELAY_US, PixelBuffer, Rgb, WS2812_BIT_RATE_HZ};

/// One-wire transmitter the matrix is wired to.
///
/// Owning a value of this type is owning the hardware channel; there is no separate "claim".
#[expect(
    async_fn_in_trait,
    reason = "Single-threaded executor; callers never need the futures to be Send"
)]
pub trait WireChannel {
    /// Sets the line bit rate. [`MatrixDriver::init`] calls this once.
    fn configure(&mut self, bit_rate_hz: u32);

    /// Queues one byte, most significant bit first. Waits while the transmit queue is full
    /// rather than dropping data.
    async fn send_byte(&mut self, byte: u8);

    /// Waits until every queued bit has left the line, including the byte still shifting out.
    async fn flush(&mut self);
}

/// Current budget for the matrix, specified in milliamps.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Milliamps(pub u16);

impl Milliamps {
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0 as u32
    }
}

/// The bytes of one pixel in wire order: green, red, blue.
#[must_use]
pub const fn wire_bytes(color: Rgb) -> [u8; 3] {
    [color.g, color.r, color.b]
}

/// Largest channel value that keeps `led_count` LEDs at full white within `max_current`.
///
/// Assumes 60 mA per LED at full white (20 mA per channel).
#[must_use]
pub const fn max_brightness_for(led_count: usize, max_current: Milliamps) -> u8 {
    assert!(led_count > 0, "matrix must contain at least one LED");
    assert!(max_current.0 > 0, "max_current must be positive");

    let numerator = max_current.as_u32() as u64 * 255;
    let denominator = led_count as u64 * 60;
    let brightness = numerator / denominator;

    if brightness >= 255 { 255 } else { brightness as u8 }
}

#[inline]
fn scale_brightness(value: u8, brightness: u8) -> u8 {
    ((u16::from(value) * u16::from(brightness)) / 255) as u8
}

/// Owns the pixel buffer and the transmission channel for the matrix.
pub struct MatrixDriver<C, D> {
    channel: C,
    delay: D,
    buffer: PixelBuffer,
    max_brightness: u8,
}

impl<C: WireChannel, D: DelayNs> MatrixDriver<C, D> {
    /// Configures `channel` for the WS2812 bit rate and starts from a dark buffer.
    ///
    /// Nothing is transmitted yet; call [`Self::blank`] to force the LEDs off.
    pub fn init(mut channel: C, delay: D) -> Self {
        channel.configure(WS2812_BIT_RATE_HZ);
        Self {
            channel,
            delay,
            buffer: PixelBuffer::new(),
            max_brightness: u8::MAX,
        }
    }

    /// Caps every transmitted channel so the whole matrix stays within `max_current`.
    /// `Milliamps(0)` removes the cap.
    ///
    /// Only the bytes on the wire are scaled; the buffer keeps the requested colors.
    #[must_use]
    pub fn with_max_current(mut self, max_current: Milliamps) -> Self {
        self.max_brightness = if max_current.0 == 0 {
            u8::MAX
        } else {
            max_brightness_for(crate::LED_COUNT, max_current)
        };
        self
    }

    #[must_use]
    pub const fn max_brightness(&self) -> u8 {
        self.max_brightness
    }

    #[must_use]
    pub const fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    #[must_use]
    pub const fn channel(&self) -> &C {
        &self.channel
    }

    #[must_use]
    pub const fn delay(&self) -> &D {
        &self.delay
    }

    /// Sends the whole buffer, LED 0 first, then waits out the latch gap.
    ///
    /// Always 75 bytes. Returns only after the string has had time to commit the frame, so a
    /// following write or clear cannot overlap it.
    pub async fn write(&mut self) {
        for pixel in self.buffer.pixels() {
            for byte in wire_bytes(*pixel) {
                self.channel
                    .send_byte(scale_brightness(byte, self.max_brightness))
                    .await;
            }
        }
        // The latch gap only counts once the line is idle.
        self.channel.flush().await;
        self.delay.delay_us(LATCH_DELAY_US).await;
    }

    /// Renders `digit` in `color` and writes it.
    pub async fn show_digit(&mut self, digit: Digit, color: Rgb) {
        self.buffer.render_digit(digit, color);
        self.write().await;
    }

    /// Clears the buffer and writes the dark frame.
    pub async fn blank(&mut self) {
        self.buffer.clear();
        self.write().await;
    }
}
