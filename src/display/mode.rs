//! Display mode selection and per-mode message composition.

use core::fmt::Write;

use serde::{Deserialize, Serialize};

use super::message::DisplayMessage;
use crate::motion::MotionState;

/// Which source feeds the renderer. The mode button cycles through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Fixed banner text.
    #[default]
    Banner,
    /// Label of the current motion state.
    State,
    /// Seconds spent in the current state, one decimal.
    Elapsed,
}

impl DisplayMode {
    pub const fn next(self) -> Self {
        match self {
            Self::Banner => Self::State,
            Self::State => Self::Elapsed,
            Self::Elapsed => Self::Banner,
        }
    }
}

/// `"<secs>.<tenths>"` from a microsecond count.
pub fn format_elapsed_tenths(elapsed_us: u64) -> heapless::String<24> {
    let secs = elapsed_us / 1_000_000;
    let tenths = (elapsed_us % 1_000_000) / 100_000;
    let mut s = heapless::String::new();
    // u64::MAX seconds plus ".9" fits in 24 bytes.
    let _ = write!(s, "{secs}.{tenths}");
    s
}

/// Build the message for `mode` from a consistent state snapshot.
pub fn compose(mode: DisplayMode, banner: &str, state: MotionState, elapsed_us: u64) -> DisplayMessage {
    match mode {
        DisplayMode::Banner => DisplayMessage::new(banner),
        DisplayMode::State => DisplayMessage::new(state.label()),
        DisplayMode::Elapsed => DisplayMessage::new(&format_elapsed_tenths(elapsed_us)),
    }
}
