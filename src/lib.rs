//! Firmware pieces for a 5×5 WS2812 digit matrix with two toggle buttons and a status OLED.
//!
//! Everything outside the `pico1` feature builds on the host, so the rendering pipeline,
//! the debouncer and the main loop can be tested with fakes.
#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod console;
pub mod debounce;
mod error;
pub mod glyph;
pub mod matrix;
mod never;
pub mod oled;
pub mod pixel_buffer;
mod shared_constants;
pub mod status;

#[cfg(feature = "pico1")]
pub mod button;
#[cfg(feature = "pico1")]
pub mod hardware;
#[cfg(feature = "pico1")]
pub mod usb_console;
#[cfg(feature = "pico1")]
pub mod ws2812_pio;

// Re-export commonly used items
pub use app::{App, AppConfig};
pub use console::{ByteSource, LinkState};
pub use debounce::{Button, DebounceConfig, InputDebouncer, ToggleState, Toggles};
pub use error::{Error, Result};
pub use glyph::{Digit, Glyph, glyph_for};
pub use matrix::{MatrixDriver, Milliamps, WireChannel};
pub use never::Never;
pub use pixel_buffer::{PixelBuffer, Rgb};
pub use shared_constants::*;
pub use status::StatusSink;
