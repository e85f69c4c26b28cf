//! Mode button polling loop.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::SharedState;
use crate::app::ports::EventSink;
use crate::drivers::button::ModeButton;

/// Sample the pin once; a press advances the display mode.
pub fn poll_once(
    state: &SharedState,
    button: &mut ModeButton,
    pin: &mut impl InputPin,
    sink: &mut impl EventSink,
) -> bool {
    let level_high = match pin.is_high() {
        Ok(level) => level,
        Err(_) => {
            warn!("INPUT | button read failed");
            return false;
        }
    };
    if button.poll(level_high) {
        state.cycle_display_mode(sink);
        true
    } else {
        false
    }
}

pub fn run_mode_button(
    state: &SharedState,
    mut pin: impl InputPin,
    mut delay: impl DelayNs,
    mut sink: impl EventSink,
    poll_ms: u32,
) {
    let mut button = ModeButton::new();
    while !state.is_shutdown() {
        poll_once(state, &mut button, &mut pin, &mut sink);
        delay.delay_ms(poll_ms);
    }
}
