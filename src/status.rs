//! Status datagram text.
//!
//! Wire format (UTF-8, one line per transition):
//!
//! ```text
//!   HH:MM:SS, Cat state: <label>\n
//! ```
//!
//! The timestamp is time spent in the *previous* state, not wall-clock.
//! Hours wrap at 24.

use core::fmt::Write;

use heapless::String;

use crate::motion::MotionState;

const STATE_TAG: &str = ", Cat state: ";

/// Fits the longest label with room to spare.
pub type StatusLine = String<64>;

/// `HH:MM:SS` with hours taken modulo 24.
pub fn format_elapsed(elapsed_secs: u64) -> String<8> {
    let hours = (elapsed_secs / 3600) % 24;
    let minutes = (elapsed_secs / 60) % 60;
    let seconds = elapsed_secs % 60;
    let mut s = String::new();
    let _ = write!(s, "{hours:02}:{minutes:02}:{seconds:02}");
    s
}

/// Full datagram for a transition into `state`.
pub fn status_line(elapsed_secs: u64, state: MotionState) -> StatusLine {
    let mut s = String::new();
    let _ = writeln!(s, "{}{}{}", format_elapsed(elapsed_secs), STATE_TAG, state.label());
    s
}

/// A decoded status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub elapsed_secs: u64,
    pub state: MotionState,
}

/// Decode a status line. Durations may be `HH:MM:SS`, `MM:SS` or `SS`.
pub fn parse_status_line(line: &str) -> Option<StatusReport> {
    let (duration, label) = line.trim().split_once(STATE_TAG)?;
    Some(StatusReport {
        elapsed_secs: parse_duration(duration)?,
        state: MotionState::from_label(label.trim())?,
    })
}

fn parse_duration(s: &str) -> Option<u64> {
    let mut parts = [0u64; 3];
    let mut count = 0;
    for field in s.trim().split(':') {
        if count == parts.len() {
            return None;
        }
        parts[count] = field.trim().parse().ok()?;
        count += 1;
    }
    // Overflowing fields are rejected like any other malformed duration.
    parts[..count]
        .iter()
        .try_fold(0u64, |acc, &field| acc.checked_mul(60)?.checked_add(field))
}
