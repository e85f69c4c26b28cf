//! Display refresh loop.
//!
//! Each refresh takes a snapshot, composes the message for the active mode
//! and writes its frames. Scrolling messages hold each frame for
//! `scroll_frame_ms` and finish with a blank frame.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::SharedState;
use crate::app::ports::{Clock, FrameSink};
use crate::config::SystemConfig;
use crate::display::{BLANK_FRAME, compose, render_message};
use crate::error::Result;

/// Render and write one message. Stops early (without clearing) on shutdown.
pub fn refresh_once(
    state: &SharedState,
    sink: &mut impl FrameSink,
    delay: &mut impl DelayNs,
    clock: &impl Clock,
    config: &SystemConfig,
) -> Result<()> {
    let snap = state.snapshot(clock.now_us());
    let message = compose(snap.display_mode, &config.banner, snap.motion, snap.elapsed_us);
    let rendered = render_message(&message);

    for frame in rendered.frames() {
        sink.write_frame(frame)?;
        if rendered.scrolls() {
            delay.delay_ms(config.scroll_frame_ms);
            if state.is_shutdown() {
                return Ok(());
            }
        }
    }
    if rendered.scrolls() {
        sink.write_frame(&BLANK_FRAME)?;
    }
    Ok(())
}

pub fn run_display(
    state: &SharedState,
    mut sink: impl FrameSink,
    mut delay: impl DelayNs,
    clock: impl Clock,
    config: &SystemConfig,
) {
    while !state.is_shutdown() {
        if let Err(e) = refresh_once(state, &mut sink, &mut delay, &clock, config) {
            warn!("DISPLAY | {}", e);
        }
        delay.delay_ms(config.display_refresh_ms);
    }
}
