//! Outbound application events.
//!
//! [`SharedState`](super::state::SharedState) emits these through the
//! [`EventSink`](super::ports::EventSink) port while it still holds the
//! state lock. Adapters on the other side decide what to do with them:
//! log to serial, send a status datagram, and so on.

use crate::display::DisplayMode;
use crate::leader::{LeaderIdentity, PulseReason};
use crate::motion::MotionState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The collar finished booting.
    Started {
        node_id: LeaderIdentity,
        state: MotionState,
    },

    /// The classifier produced a new state. `elapsed_secs` is the time
    /// spent in `from`.
    MotionChanged {
        from: MotionState,
        to: MotionState,
        elapsed_secs: u64,
    },

    /// A different node became leader.
    LeaderChanged {
        previous: Option<LeaderIdentity>,
        current: LeaderIdentity,
    },

    /// This node gained (`true`) or lost (`false`) leadership.
    LeaderDesignated(bool),

    /// The buzzer was pulsed.
    AlertPulsed(PulseReason),

    /// The mode button selected a new display source.
    DisplayModeChanged(DisplayMode),
}
