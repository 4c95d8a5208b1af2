//! The status screen: both toggle states and the last received character.
//!
//! ```text
//!  y=10   Green LED:   ON
//!  y=30   Char:        3      (only once a character has arrived)
//!  y=50   Blue LED:    OFF
//!         x=8          x=90
//! ```

use crate::{Result, Toggles};

/// A text display that is redrawn a whole frame at a time.
///
/// Coordinates are the sink's own pixel coordinates (top-left of the text).
pub trait StatusSink {
    /// Starts a new frame from a blank screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`](crate::Error::Display) if the display rejects the operation.
    fn begin_frame(&mut self) -> Result<()>;

    /// # Errors
    ///
    /// Returns [`Error::Display`](crate::Error::Display) if the display rejects the operation.
    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<()>;

    /// Commits the frame to the panel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`](crate::Error::Display) if the display rejects the operation.
    fn end_frame(&mut self) -> Result<()>;
}

pub const LABEL_X: i32 = 8;
pub const VALUE_X: i32 = 90;
pub const GREEN_ROW_Y: i32 = 10;
pub const CHAR_ROW_Y: i32 = 30;
pub const BLUE_ROW_Y: i32 = 50;

const fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

/// Redraws the whole status screen.
///
/// # Errors
///
/// Propagates the first error from `sink`; the rest of the frame is skipped.
pub fn refresh<S: StatusSink + ?Sized>(
    sink: &mut S,
    toggles: Toggles,
    last_char: Option<char>,
) -> Result<()> {
    sink.begin_frame()?;

    sink.draw_text("Green LED:", LABEL_X, GREEN_ROW_Y)?;
    sink.draw_text(on_off(toggles.green), VALUE_X, GREEN_ROW_Y)?;

    if let Some(character) = last_char {
        let mut utf8 = [0u8; 4];
        sink.draw_text("Char:", LABEL_X, CHAR_ROW_Y)?;
        sink.draw_text(character.encode_utf8(&mut utf8), VALUE_X, CHAR_ROW_Y)?;
    }

    sink.draw_text("Blue LED:", LABEL_X, BLUE_ROW_Y)?;
    sink.draw_text(on_off(toggles.blue), VALUE_X, BLUE_ROW_Y)?;

    sink.end_frame()
}
