//! [`StatusSink`] on an SSD1306 OLED in buffered graphics mode.

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::{Drawable, Point},
    text::{Baseline, Text},
};
use ssd1306::{
    Ssd1306,
    mode::{BufferedGraphicsMode, DisplayConfig},
    prelude::{DisplayRotation, WriteOnlyDataCommand},
    size::DisplaySize,
};

use crate::{Error, Result, StatusSink};

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_6X10, BinaryColor::On)
}

/// An SSD1306 panel drawing the status screen in the 6×10 font.
pub struct OledStatus<DI, SIZE: DisplaySize> {
    display: Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>,
}

impl<DI: WriteOnlyDataCommand, SIZE: DisplaySize> OledStatus<DI, SIZE> {
    /// Initializes the panel and leaves it blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if the panel does not answer.
    pub fn new(interface: DI, size: SIZE) -> Result<Self> {
        let mut display = Ssd1306::new(interface, size, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| Error::Display)?;
        display.clear_buffer();
        display.flush().map_err(|_| Error::Display)?;
        Ok(Self { display })
    }
}

impl<DI: WriteOnlyDataCommand, SIZE: DisplaySize> StatusSink for OledStatus<DI, SIZE> {
    fn begin_frame(&mut self) -> Result<()> {
        self.display.clear_buffer();
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<()> {
        Text::with_baseline(text, Point::new(x, y), text_style(), Baseline::Top)
            .draw(&mut self.display)
            .map_err(|_| Error::Display)?;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.display.flush().map_err(|_| Error::Display)
    }
}
