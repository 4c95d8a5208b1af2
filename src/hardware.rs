//! Board bring-up: claims every peripheral the firmware uses and puts it in its idle state.

use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::{I2C1, PIO0, USB};
use embassy_rp::Peri;
use ssd1306::I2CDisplayInterface;
use ssd1306::prelude::I2CInterface;
use ssd1306::size::DisplaySize128x64;

use crate::oled::OledStatus;
use crate::ws2812_pio::{self, PioWireChannel};
use crate::{OLED_I2C_ADDRESS, OLED_I2C_FREQUENCY_HZ, Result};

pub type MatrixChannel = PioWireChannel<'static, PIO0, 0>;
pub type StatusDisplay = OledStatus<I2CInterface<I2c<'static, I2C1, Blocking>>, DisplaySize128x64>;

/// Wiring (GPIO): matrix data 7, buttons 5 and 6 (to ground), green/blue/red LEDs 11/12/13,
/// OLED on I2C1 with SDA 14 and SCL 15.
pub struct Hardware {
    pub matrix_channel: MatrixChannel,
    pub button_a: Input<'static>,
    pub button_b: Input<'static>,
    pub green_led: Output<'static>,
    pub blue_led: Output<'static>,
    /// Wired on the board but not driven by anything; held low.
    pub red_led: Output<'static>,
    pub status_display: StatusDisplay,
    pub usb: Peri<'static, USB>,
}

impl Hardware {
    /// Initializes the chip and every peripheral. All indicator LEDs start off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`](crate::Error::Display) if the OLED does not respond.
    pub fn new() -> Result<Self> {
        let peripherals = embassy_rp::init(embassy_rp::config::Config::default());

        let matrix_channel = ws2812_pio::init_pio0(peripherals.PIO0, peripherals.PIN_7);

        let button_a = Input::new(peripherals.PIN_5, Pull::Up);
        let button_b = Input::new(peripherals.PIN_6, Pull::Up);

        let green_led = Output::new(peripherals.PIN_11, Level::Low);
        let blue_led = Output::new(peripherals.PIN_12, Level::Low);
        let red_led = Output::new(peripherals.PIN_13, Level::Low);

        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = OLED_I2C_FREQUENCY_HZ;
        let i2c = I2c::new_blocking(
            peripherals.I2C1,
            peripherals.PIN_15,
            peripherals.PIN_14,
            i2c_config,
        );
        let interface = I2CDisplayInterface::new_custom_address(i2c, OLED_I2C_ADDRESS);
        let status_display = OledStatus::new(interface, DisplaySize128x64)?;

        Ok(Self {
            matrix_channel,
            button_a,
            button_b,
            green_led,
            blue_led,
            red_led,
            status_display,
            usb: peripherals.USB,
        })
    }
}
