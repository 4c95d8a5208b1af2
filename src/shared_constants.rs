use embassy_time::Duration;
use smart_leds::RGB8;

// The matrix is a 5x5 grid of WS2812 LEDs, addressed row-major.
pub const MATRIX_WIDTH: usize = 5;
pub const MATRIX_HEIGHT: usize = 5;
pub const LED_COUNT: usize = MATRIX_WIDTH * MATRIX_HEIGHT;
/// Bytes on the wire per frame: three color channels per LED.
pub const FRAME_BYTES: usize = LED_COUNT * 3;

/// WS2812 nominal bit rate.
pub const WS2812_BIT_RATE_HZ: u32 = 800_000;
/// Idle time after the last bit before the string latches the frame (datasheet minimum is 50 µs).
pub const LATCH_DELAY_US: u32 = 100;

/// Color used for the lit cells of a digit.
pub const DIGIT_COLOR: RGB8 = RGB8 { r: 0, g: 50, b: 0 };

// Status OLED bus settings. The pin map lives on `hardware::Hardware`.
pub const OLED_I2C_ADDRESS: u8 = 0x3C;
pub const OLED_I2C_FREQUENCY_HZ: u32 = 400_000;

/// USB identity of the serial console (test VID/PID pair).
pub const USB_VID: u16 = 0xc0de;
pub const USB_PID: u16 = 0xcafe;

// Tuning knobs; `build.rs` fills these from the environment or `.env`.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(parse_u64(env!("DEBOUNCE_MS")));
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(parse_u64(env!("REFRESH_MS")));
/// Current budget for the matrix in milliamps; 0 means no brightness cap.
pub const MAX_CURRENT_MA: u16 = {
    let milliamps = parse_u64(env!("MAX_CURRENT_MA"));
    assert!(milliamps <= u16::MAX as u64, "MAX_CURRENT_MA must fit in u16");
    milliamps as u16
};

/// Parses a decimal `u64` at compile time, e.g. `parse_u64("200") == 200`.
#[must_use]
pub const fn parse_u64(text: &str) -> u64 {
    let bytes = text.as_bytes();
    assert!(!bytes.is_empty(), "expected a decimal number, got an empty string");

    let mut value: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        assert!(byte.is_ascii_digit(), "expected only decimal digits");
        value = match value.checked_mul(10) {
            Some(shifted) => match shifted.checked_add((byte - b'0') as u64) {
                Some(sum) => sum,
                None => panic!("number does not fit in u64"),
            },
            None => panic!("number does not fit in u64"),
        };
        i += 1;
    }
    value
}
