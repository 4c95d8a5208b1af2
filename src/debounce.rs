//! Debounced button toggles.
//!
//! Each button owns a toggle bit. A falling edge flips the bit unless it arrives within the
//! debounce window of the last edge accepted *for that same button*. The edge handler is the
//! only writer of [`ToggleState`]; the main loop only reads it.

use embassy_time::{Duration, Instant};
use embedded_hal::digital::{OutputPin, PinState};
use portable_atomic::{AtomicBool, Ordering};

use crate::{DEBOUNCE_WINDOW, Error, Result};

/// The two monitored push buttons.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Toggles the green indicator.
    A,
    /// Toggles the blue indicator.
    B,
}

impl Button {
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Name of the indicator LED this button controls.
    #[must_use]
    pub const fn led_name(self) -> &'static str {
        match self {
            Self::A => "green",
            Self::B => "blue",
        }
    }
}

/// A consistent copy of both toggle bits.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Toggles {
    pub green: bool,
    pub blue: bool,
}

/// Toggle bits shared between the edge handler (writer) and the main loop (reader).
///
/// Each bit is a single atomic, so a reader never sees a half-written value. The RP2040's
/// Cortex-M0+ has no atomic read-modify-write; a single writer only needs load and store.
pub struct ToggleState {
    green: AtomicBool,
    blue: AtomicBool,
}

impl Default for ToggleState {
    fn default() -> Self {
        Self::new()
    }
}

impl ToggleState {
    /// Both toggles off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            green: AtomicBool::new(false),
            blue: AtomicBool::new(false),
        }
    }

    const fn bit(&self, button: Button) -> &AtomicBool {
        match button {
            Button::A => &self.green,
            Button::B => &self.blue,
        }
    }

    #[must_use]
    pub fn get(&self, button: Button) -> bool {
        self.bit(button).load(Ordering::Acquire)
    }

    #[must_use]
    pub fn snapshot(&self) -> Toggles {
        Toggles {
            green: self.get(Button::A),
            blue: self.get(Button::B),
        }
    }

    fn set(&self, button: Button, on: bool) {
        self.bit(button).store(on, Ordering::Release);
    }
}

/// Debounce tuning.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DebounceConfig {
    /// Edges closer than this to the last accepted edge of the same button are ignored.
    pub window: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window: DEBOUNCE_WINDOW,
        }
    }
}

struct Lane<P> {
    last_accepted: Option<Instant>,
    indicator: P,
}

/// Turns raw falling edges into toggles and mirrors each toggle on an indicator pin.
pub struct InputDebouncer<'a, P> {
    state: &'a ToggleState,
    window: Duration,
    a: Lane<P>,
    b: Lane<P>,
}

impl<'a, P: OutputPin> InputDebouncer<'a, P> {
    /// `green` follows button A, `blue` follows button B. Both are driven to match `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if an indicator pin cannot be driven.
    pub fn new(state: &'a ToggleState, green: P, blue: P, config: DebounceConfig) -> Result<Self> {
        let mut debouncer = Self {
            state,
            window: config.window,
            a: Lane {
                last_accepted: None,
                indicator: green,
            },
            b: Lane {
                last_accepted: None,
                indicator: blue,
            },
        };
        for button in Button::ALL {
            let on = state.get(button);
            debouncer
                .lane_mut(button)
                .indicator
                .set_state(PinState::from(on))
                .map_err(|_| Error::CannotSetOutputState)?;
        }
        Ok(debouncer)
    }

    fn lane_mut(&mut self, button: Button) -> &mut Lane<P> {
        match button {
            Button::A => &mut self.a,
            Button::B => &mut self.b,
        }
    }

    /// Handles a falling edge on `button` observed at `now`.
    ///
    /// Returns the new toggle value, or `None` when the edge was a bounce.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if the indicator pin cannot be driven. The toggle
    /// has already flipped at that point.
    pub fn on_falling_edge(&mut self, button: Button, now: Instant) -> Result<Option<bool>> {
        let state = self.state;
        let window = self.window;
        let lane = self.lane_mut(button);

        if let Some(last) = lane.last_accepted {
            // An edge stamped before the last accepted one can only be noise.
            let is_bounce = now
                .checked_duration_since(last)
                .is_none_or(|elapsed| elapsed < window);
            if is_bounce {
                #[cfg(feature = "defmt")]
                defmt::debug!("button {} bounce ignored", button);
                return Ok(None);
            }
        }

        let on = !state.get(button);
        state.set(button, on);
        lane.last_accepted = Some(now);
        lane.indicator
            .set_state(PinState::from(on))
            .map_err(|_| Error::CannotSetOutputState)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "{} LED {}",
            button.led_name(),
            if on { "on" } else { "off" }
        );
        Ok(Some(on))
    }
}
