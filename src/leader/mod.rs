//! Leader coordination.
//!
//! Identity tokens arrive asynchronously from the network. Each one is fed
//! to [`LeaderCoordinator::on_identity`], which decides whether the buzzer
//! pulses:
//!
//! ```text
//!            ┌──────┐   T            ┌────────────────┐
//!            │ Idle │ ─────────────▶ │ Following(T)   │ ──┐ T' != T
//!            └──────┘                └────────────────┘ ◀─┘ (pulse once)
//!
//!   is_leader (T == own id, or the "leader" keyword) ─▶ pulse on every message
//! ```
//!
//! The flag path takes precedence: while this node is the leader every
//! message pulses, whatever identity it carries.

pub mod election;

use core::str;

use heapless::String;

use crate::config::bounded;

pub use election::ActivityTally;

/// Longest identity token, in bytes.
pub const MAX_IDENTITY_LEN: usize = 40;

/// Keyword that designates the receiving node as leader.
pub const LEADER_KEYWORD: &str = "leader";

pub type LeaderIdentity = String<MAX_IDENTITY_LEN>;

/// Decode a datagram payload into an identity token.
///
/// Invalid UTF-8 ends the token, surrounding whitespace and NUL padding are
/// dropped, and anything past 40 bytes is cut on a char boundary. Returns
/// `None` when nothing is left.
pub fn parse_identity(payload: &[u8]) -> Option<LeaderIdentity> {
    let text = match str::from_utf8(payload) {
        Ok(s) => s,
        // `valid_up_to` always marks a char boundary.
        Err(e) => str::from_utf8(&payload[..e.valid_up_to()]).ok()?,
    };
    let trimmed = text.trim_matches(is_padding);
    if trimmed.is_empty() {
        return None;
    }
    // Cutting at 40 bytes can expose interior padding at the new end.
    let cut: LeaderIdentity = bounded(trimmed);
    Some(bounded(cut.trim_end_matches(is_padding)))
}

fn is_padding(c: char) -> bool {
    c.is_whitespace() || c == '\0'
}

/// Why the buzzer pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseReason {
    /// This node is the leader; pulse on every message.
    Designated,
    /// A different node became leader.
    LeaderChanged,
}

/// What the actuator should do in response to one identity message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderAction {
    Pulse(PulseReason),
    Silence,
}

/// Outcome of [`LeaderCoordinator::on_identity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderUpdate {
    pub action: LeaderAction,
    /// The tracked leader identity moved to a new value.
    pub leader_changed: bool,
    /// `is_leader` flipped.
    pub designation_changed: bool,
}

impl LeaderUpdate {
    pub fn pulses(&self) -> bool {
        matches!(self.action, LeaderAction::Pulse(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderPhase<'a> {
    Idle,
    Following(&'a str),
}

#[derive(Debug, Clone)]
pub struct LeaderCoordinator {
    own_id: LeaderIdentity,
    current: Option<LeaderIdentity>,
    previous: Option<LeaderIdentity>,
    is_leader: bool,
}

impl LeaderCoordinator {
    pub fn new(own_id: &str) -> Self {
        Self {
            own_id: bounded(own_id),
            current: None,
            previous: None,
            is_leader: false,
        }
    }

    pub fn own_id(&self) -> &str {
        &self.own_id
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn is_leader(&self) -> bool {
        self.is_leader
    }

    pub fn phase(&self) -> LeaderPhase<'_> {
        match &self.current {
            None => LeaderPhase::Idle,
            Some(id) => LeaderPhase::Following(id.as_str()),
        }
    }

    /// Set the leader flag directly. The next identity message pulses on it,
    /// then recomputes it from that message's token.
    pub fn set_designated(&mut self, is_leader: bool) {
        self.is_leader = is_leader;
    }

    /// Apply one inbound identity token.
    ///
    /// A node flagged on entry pulses regardless of the token. A token that
    /// designates this node (own id or the keyword) pulses as well.
    pub fn on_identity(&mut self, token: &str) -> LeaderUpdate {
        let was_leader = self.is_leader;
        let keyword = token == LEADER_KEYWORD;
        self.is_leader = keyword || token == self.own_id.as_str();

        let leader_changed = !keyword && self.current.as_deref() != Some(token);
        if leader_changed {
            self.previous = self.current.replace(bounded(token));
        }

        let action = if was_leader || self.is_leader {
            LeaderAction::Pulse(PulseReason::Designated)
        } else if leader_changed {
            LeaderAction::Pulse(PulseReason::LeaderChanged)
        } else {
            LeaderAction::Silence
        };

        LeaderUpdate {
            action,
            leader_changed,
            designation_changed: was_leader != self.is_leader,
        }
    }
}
