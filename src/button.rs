//! Button task: turns GPIO falling edges into debounced toggles.

use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::gpio::{Input, Output};
use embassy_time::Instant;

use crate::{Button, DebounceConfig, Error, InputDebouncer, Result, ToggleState};

/// Spawns the task watching `button_a` and `button_b`. Toggles are published through `state`.
///
/// Both inputs must already be configured with pull-ups; a press pulls the line low.
///
/// # Errors
///
/// Returns [`Error::CannotSetOutputState`] if an indicator cannot be driven, or
/// [`Error::TaskSpawn`] if the task is already running.
pub fn spawn_toggle_buttons(
    button_a: Input<'static>,
    button_b: Input<'static>,
    green_led: Output<'static>,
    blue_led: Output<'static>,
    state: &'static ToggleState,
    config: DebounceConfig,
    spawner: Spawner,
) -> Result<()> {
    let debouncer = InputDebouncer::new(state, green_led, blue_led, config)?;
    let token = button_task(button_a, button_b, debouncer).map_err(Error::TaskSpawn)?;
    spawner.spawn(token);
    Ok(())
}

#[embassy_executor::task]
async fn button_task(
    mut button_a: Input<'static>,
    mut button_b: Input<'static>,
    mut debouncer: InputDebouncer<'static, Output<'static>>,
) -> ! {
    #[cfg(feature = "defmt")]
    defmt::info!("button task started");
    loop {
        let button = match select(
            button_a.wait_for_falling_edge(),
            button_b.wait_for_falling_edge(),
        )
        .await
        {
            Either::First(()) => Button::A,
            Either::Second(()) => Button::B,
        };

        if let Err(_err) = debouncer.on_falling_edge(button, Instant::now()) {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "{} indicator: {}",
                button.led_name(),
                defmt::Display2Format(&_err)
            );
        }
    }
}
