//! Shows the last digit typed on the USB serial console on a 5×5 WS2812 matrix. Two buttons
//! toggle the green and blue indicator LEDs; an OLED shows both toggles and the last character.
//!
//! Runs on a Raspberry Pi Pico (RP2040).
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "Single-threaded")]

use defmt::info;
use defmt_rtt as _;
use digit_matrix::button::spawn_toggle_buttons;
use digit_matrix::hardware::Hardware;
use digit_matrix::usb_console::UsbConsole;
use digit_matrix::{
    App, AppConfig, DebounceConfig, MAX_CURRENT_MA, MatrixDriver, Milliamps, Never, Result,
    ToggleState,
};
use embassy_executor::Spawner;
use embassy_time::Delay;
use panic_probe as _;

static TOGGLES: ToggleState = ToggleState::new();

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Never> {
    let Hardware {
        matrix_channel,
        button_a,
        button_b,
        green_led,
        blue_led,
        red_led: _red_led,
        status_display,
        usb,
    } = Hardware::new()?;

    let mut matrix =
        MatrixDriver::init(matrix_channel, Delay).with_max_current(Milliamps(MAX_CURRENT_MA));
    matrix.blank().await;

    spawn_toggle_buttons(
        button_a,
        button_b,
        green_led,
        blue_led,
        &TOGGLES,
        DebounceConfig::default(),
        spawner,
    )?;
    let console = UsbConsole::new(usb, spawner)?;

    info!("digit matrix ready");
    App::new(
        matrix,
        status_display,
        console,
        &TOGGLES,
        Delay,
        AppConfig::default(),
    )
    .run()
    .await
}
