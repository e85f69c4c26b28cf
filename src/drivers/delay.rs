//! `DelayNs` implementations.

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// Blocks the calling thread. On ESP-IDF `thread::sleep` yields to the
/// FreeRTOS scheduler, so other tasks keep running.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Returns immediately. Used by tests and simulations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
