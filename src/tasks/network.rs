//! Leader identity listener loop.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::SharedState;
use crate::app::ports::{AlertPort, EventSink, IdentitySource};
use crate::leader::LeaderUpdate;

/// Pause after a receive error before trying again.
pub const ERROR_BACKOFF_MS: u32 = 1_000;

/// Wait for one identity and apply it. `None` when nothing arrived.
pub fn handle_once(
    state: &SharedState,
    source: &mut impl IdentitySource,
    alert: &mut impl AlertPort,
    sink: &mut impl EventSink,
    delay: &mut impl DelayNs,
) -> Option<LeaderUpdate> {
    match source.next_identity() {
        Ok(Some(id)) => Some(state.on_identity(&id, alert, sink)),
        Ok(None) => None,
        Err(e) => {
            warn!("LISTEN | {}", e);
            delay.delay_ms(ERROR_BACKOFF_MS);
            None
        }
    }
}

pub fn run_identity_listener(
    state: &SharedState,
    mut source: impl IdentitySource,
    mut alert: impl AlertPort,
    mut sink: impl EventSink,
    mut delay: impl DelayNs,
) {
    while !state.is_shutdown() {
        handle_once(state, &mut source, &mut alert, &mut sink, &mut delay);
    }
    alert.silence();
}
