//! Sampling and classification loop.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::SharedState;
use crate::app::ports::{AccelerometerPort, Clock, EventSink};
use crate::config::SystemConfig;
use crate::motion::{MotionSample, MotionState, SampleWindow};

/// Take one window of readings, `interval_ms` apart. Failed reads are
/// skipped. Returns `None` on shutdown or when every read failed.
pub fn collect_window(
    state: &SharedState,
    accel: &mut impl AccelerometerPort,
    delay: &mut impl DelayNs,
    samples: u8,
    interval_ms: u32,
) -> Option<MotionSample> {
    let mut window = SampleWindow::new(samples);
    for _ in 0..window.capacity() {
        match accel.read_acceleration() {
            Ok(a) => {
                window.push(a);
            }
            Err(e) => warn!("SAMPLE | read failed: {}", e),
        }
        delay.delay_ms(interval_ms);
        if state.is_shutdown() {
            return None;
        }
    }
    if window.is_empty() {
        warn!("SAMPLE | no good readings this window");
    }
    window.sample()
}

/// One full cycle: collect, classify, publish. Returns the classification.
pub fn sample_once(
    state: &SharedState,
    accel: &mut impl AccelerometerPort,
    delay: &mut impl DelayNs,
    clock: &impl Clock,
    sink: &mut impl EventSink,
    config: &SystemConfig,
) -> Option<MotionState> {
    let sample = collect_window(
        state,
        accel,
        delay,
        config.samples_per_window,
        config.sample_interval_ms,
    )?;
    let next = sample.classify();
    state.apply_motion(next, clock, sink);
    Some(next)
}

pub fn run_sampler(
    state: &SharedState,
    mut accel: impl AccelerometerPort,
    mut delay: impl DelayNs,
    clock: impl Clock,
    mut sink: impl EventSink,
    config: &SystemConfig,
) {
    while !state.is_shutdown() {
        sample_once(state, &mut accel, &mut delay, &clock, &mut sink, config);
    }
}
