//! The main loop: poll serial input, render digits, refresh the status screen.

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::{
    ByteSource, DIGIT_COLOR, Digit, MatrixDriver, REFRESH_INTERVAL, Rgb, StatusSink, ToggleState,
    WireChannel, status,
};

/// Main loop tuning.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AppConfig {
    /// Sleep between loop iterations.
    pub refresh_interval: Duration,
    /// Color of the lit cells of a digit.
    pub digit_color: Rgb,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_interval: REFRESH_INTERVAL,
            digit_color: DIGIT_COLOR,
        }
    }
}

/// Everything the main loop touches, in one place.
///
/// The toggle bits are the only state shared with another task (the button handler); the app
/// only reads them.
pub struct App<'a, C, D, S, B, T> {
    matrix: MatrixDriver<C, D>,
    status: S,
    source: B,
    toggles: &'a ToggleState,
    ticker: T,
    config: AppConfig,
    last_char: Option<char>,
}

impl<'a, C, D, S, B, T> App<'a, C, D, S, B, T>
where
    C: WireChannel,
    D: DelayNs,
    S: StatusSink,
    B: ByteSource,
    T: DelayNs,
{
    pub const fn new(
        matrix: MatrixDriver<C, D>,
        status: S,
        source: B,
        toggles: &'a ToggleState,
        ticker: T,
        config: AppConfig,
    ) -> Self {
        Self {
            matrix,
            status,
            source,
            toggles,
            ticker,
            config,
            last_char: None,
        }
    }

    /// Runs [`Self::tick`] every refresh interval, forever.
    pub async fn run(mut self) -> ! {
        let sleep_us = u32::try_from(self.config.refresh_interval.as_micros()).unwrap_or(u32::MAX);
        loop {
            self.tick().await;
            self.ticker.delay_us(sleep_us).await;
        }
    }

    /// One loop iteration: take at most one character, then redraw the status screen.
    pub async fn tick(&mut self) {
        if self.source.is_connected() {
            if let Some(character) = self.source.try_read_char() {
                self.accept(character).await;
            }
        }

        if let Err(_err) = status::refresh(&mut self.status, self.toggles.snapshot(), self.last_char)
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("status refresh failed: {}", defmt::Display2Format(&_err));
        }
    }

    async fn accept(&mut self, character: char) {
        #[cfg(feature = "defmt")]
        defmt::info!("received {:?}", character);

        // Terminals follow every key with a line ending; keep showing the key.
        if matches!(character, '\r' | '\n') {
            return;
        }
        self.last_char = Some(character);

        if let Some(digit) = Digit::from_char(character) {
            self.matrix.show_digit(digit, self.config.digit_color).await;
        }
    }

    #[must_use]
    pub const fn last_char(&self) -> Option<char> {
        self.last_char
    }

    #[must_use]
    pub const fn matrix(&self) -> &MatrixDriver<C, D> {
        &self.matrix
    }

    #[must_use]
    pub const fn status(&self) -> &S {
        &self.status
    }

    pub fn source_mut(&mut self) -> &mut B {
        &mut self.source
    }
}
