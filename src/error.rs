use core::convert::Infallible;

use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors surfaced by board bring-up and the status display.
///
/// Contract violations (bad pixel index, digit outside 0-9) are not errors; see
/// [`PixelBuffer`](crate::PixelBuffer) and [`glyph_for`](crate::glyph_for).
#[derive(Debug, Display, Error)]
pub enum Error {
    // `SpawnError` is not a `core::error::Error` source.
    /// Spawning an embassy task failed (the task pool is already in use).
    #[cfg(feature = "pico1")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// A GPIO write failed. Never happens on the RP2040, whose pins are `Infallible`.
    #[display("Error setting output state")]
    CannotSetOutputState,

    /// The OLED (or its I2C bus) rejected a draw or flush.
    #[display("Status display did not accept the frame")]
    Display,
}

impl From<Infallible> for Error {
    fn from(_: Infallible) -> Self {
        Self::CannotSetOutputState
    }
}

#[cfg(feature = "pico1")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}
