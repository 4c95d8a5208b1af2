//! Host-level tests for the per-button debounce state machine.

mod support;

use digit_matrix::{Button, DebounceConfig, InputDebouncer, ToggleState, Toggles};
use embassy_time::{Duration, Instant};
use support::FakePin;

fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

fn press<P: embedded_hal::digital::OutputPin>(
    buttons: &mut InputDebouncer<'_, P>,
    button: Button,
    ms: u64,
) -> Option<bool> {
    buttons
        .on_falling_edge(button, at(ms))
        .expect("fake pins cannot fail")
}

fn debouncer(state: &ToggleState) -> InputDebouncer<'_, FakePin> {
    let config = DebounceConfig {
        window: Duration::from_millis(200),
    };
    InputDebouncer::new(state, FakePin::default(), FakePin::default(), config)
        .expect("fake pins cannot fail")
}

#[test]
fn first_press_toggles_on() {
    let state = ToggleState::new();
    let mut buttons = debouncer(&state);

    assert_eq!(press(&mut buttons, Button::A, 0), Some(true));
    assert_eq!(
        state.snapshot(),
        Toggles {
            green: true,
            blue: false
        }
    );
}

#[test]
fn edge_inside_window_is_ignored() {
    let state = ToggleState::new();
    let mut buttons = debouncer(&state);

    assert_eq!(press(&mut buttons, Button::A, 0), Some(true));
    assert_eq!(press(&mut buttons, Button::A, 150), None);
    assert!(state.get(Button::A));
}

#[test]
fn edge_at_or_after_window_toggles_back() {
    let state = ToggleState::new();
    let mut buttons = debouncer(&state);

    assert_eq!(press(&mut buttons, Button::A, 0), Some(true));
    assert_eq!(press(&mut buttons, Button::A, 200), Some(false));
    assert_eq!(press(&mut buttons, Button::A, 450), Some(true));
    assert!(state.get(Button::A));
}

#[test]
fn window_is_measured_from_last_accepted_edge() {
    let state = ToggleState::new();
    let mut buttons = debouncer(&state);

    assert_eq!(press(&mut buttons, Button::B, 1_000), Some(true));
    // A burst of bounces does not extend the window.
    for ms in [1_010, 1_050, 1_120, 1_190] {
        assert_eq!(press(&mut buttons, Button::B, ms), None);
    }
    assert_eq!(press(&mut buttons, Button::B, 1_200), Some(false));
}

#[test]
fn buttons_debounce_independently() {
    let state = ToggleState::new();
    let mut buttons = debouncer(&state);

    assert_eq!(press(&mut buttons, Button::A, 0), Some(true));
    // B's window is its own, so a press right after A still counts.
    assert_eq!(press(&mut buttons, Button::B, 10), Some(true));
    assert_eq!(
        state.snapshot(),
        Toggles {
            green: true,
            blue: true
        }
    );
}

#[test]
fn earlier_timestamp_is_a_bounce() {
    let state = ToggleState::new();
    let mut buttons = debouncer(&state);

    assert_eq!(press(&mut buttons, Button::A, 500), Some(true));
    assert_eq!(press(&mut buttons, Button::A, 100), None);
    assert!(state.get(Button::A));
}

#[test]
fn indicators_follow_their_toggles() {
    let state = ToggleState::new();
    let mut green = FakePin::default();
    let mut blue = FakePin::default();
    {
        let mut buttons =
            InputDebouncer::new(&state, &mut green, &mut blue, DebounceConfig::default())
                .expect("fake pins cannot fail");
        buttons.on_falling_edge(Button::A, at(0)).expect("infallible");
        buttons.on_falling_edge(Button::B, at(0)).expect("infallible");
        buttons.on_falling_edge(Button::B, at(10_000)).expect("infallible");
    }

    // Both start low, then follow every accepted edge.
    assert_eq!(green.levels, [false, true]);
    assert_eq!(blue.levels, [false, true, false]);
    assert!(green.is_high());
    assert!(!blue.is_high());
}

#[test]
fn new_drives_indicators_to_existing_state() {
    let state = ToggleState::new();
    let mut green = FakePin::default();
    let mut blue = FakePin::default();
    {
        let mut buttons =
            InputDebouncer::new(&state, &mut green, &mut blue, DebounceConfig::default())
                .expect("fake pins cannot fail");
        buttons.on_falling_edge(Button::A, at(0)).expect("infallible");
    }

    let mut green_again = FakePin::default();
    let mut blue_again = FakePin::default();
    InputDebouncer::new(
        &state,
        &mut green_again,
        &mut blue_again,
        DebounceConfig::default(),
    )
    .expect("fake pins cannot fail");
    assert!(green_again.is_high());
    assert!(!blue_again.is_high());
}
