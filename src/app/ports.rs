//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ tasks / SharedState (domain)
//! ```
//!
//! Drivers and adapters implement these traits. The worker tasks consume
//! them via generics, so the domain never touches hardware directly and
//! every loop runs on the host against mocks.

use crate::display::GlyphFrame;
use crate::error::Result;
use crate::leader::LeaderIdentity;
use crate::motion::Acceleration;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait Clock {
    /// Microseconds since boot.
    fn now_us(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

pub trait AccelerometerPort {
    /// One reading in m/s².
    fn read_acceleration(&mut self) -> Result<Acceleration>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Accepts whole frames and writes them in order, blocking until done.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &GlyphFrame) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Alert port (driven adapter: domain → buzzer)
// ───────────────────────────────────────────────────────────────

pub trait AlertPort {
    /// One blocking on/off cycle.
    fn pulse(&mut self);

    /// Make sure the actuator is off.
    fn silence(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Identity source (driving adapter: network → domain)
// ───────────────────────────────────────────────────────────────

pub trait IdentitySource {
    /// Wait a bounded time for the next identity token. `Ok(None)` means
    /// nothing arrived (or the payload was empty) and the caller should
    /// check for shutdown and try again.
    fn next_identity(&mut self) -> Result<Option<LeaderIdentity>>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

/// Fan out to two sinks, in order.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

/// A sink that may be missing (e.g. the status socket failed to bind).
impl<S: EventSink> EventSink for Option<S> {
    fn emit(&mut self, event: &AppEvent) {
        if let Some(sink) = self {
            sink.emit(event);
        }
    }
}
