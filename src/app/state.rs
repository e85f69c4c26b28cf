//! Process-wide collar state behind a single lock.
//!
//! ```text
//!   sampler ── apply_motion() ───────┐
//!   button  ── cycle_display_mode() ─┼──▶ Mutex<CollarState> ── snapshot() ──▶ display
//!   network ── on_identity() ────────┘
//! ```
//!
//! Every mutation and the side effect that must observe it (status event,
//! buzzer pulse) happen inside one lock acquisition, so a reader never sees
//! a new motion state with a stale `since_us`. The buzzer pulse blocks
//! while the lock is held; pulses are rare and short.
//!
//! Poisoned locks are recovered.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::events::AppEvent;
use super::ports::{AlertPort, Clock, EventSink};
use crate::display::DisplayMode;
use crate::config::bounded;
use crate::leader::{LeaderAction, LeaderCoordinator, LeaderIdentity, LeaderUpdate};
use crate::motion::MotionState;

#[derive(Debug)]
struct CollarState {
    motion: MotionState,
    /// Monotonic time of the last motion transition (µs).
    since_us: u64,
    display_mode: DisplayMode,
    leader: LeaderCoordinator,
}

/// Consistent copy of the shared state, taken under the lock.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub motion: MotionState,
    pub since_us: u64,
    /// Time in `motion` as of the snapshot.
    pub elapsed_us: u64,
    pub display_mode: DisplayMode,
    pub leader: Option<LeaderIdentity>,
    pub is_leader: bool,
}

#[derive(Debug)]
pub struct SharedState {
    inner: Mutex<CollarState>,
    shutdown: AtomicBool,
}

impl SharedState {
    /// Start in `Sleep`, banner mode, no leader known.
    pub fn new(node_id: &str, now_us: u64) -> Self {
        Self {
            inner: Mutex::new(CollarState {
                motion: MotionState::default(),
                since_us: now_us,
                display_mode: DisplayMode::default(),
                leader: LeaderCoordinator::new(node_id),
            }),
            shutdown: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CollarState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Motion ────────────────────────────────────────────────

    /// Record a classifier result. Identical results are no-ops; a change
    /// resets `since_us` and emits [`AppEvent::MotionChanged`] before the
    /// lock is released. Returns `true` on a transition.
    pub fn apply_motion(
        &self,
        next: MotionState,
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> bool {
        let mut st = self.lock();
        if st.motion == next {
            return false;
        }
        let now = clock.now_us();
        let elapsed_secs = now.saturating_sub(st.since_us) / 1_000_000;
        let from = st.motion;
        st.motion = next;
        st.since_us = now;
        sink.emit(&AppEvent::MotionChanged {
            from,
            to: next,
            elapsed_secs,
        });
        true
    }

    pub fn motion(&self) -> MotionState {
        self.lock().motion
    }

    pub fn snapshot(&self, now_us: u64) -> Snapshot {
        let st = self.lock();
        Snapshot {
            motion: st.motion,
            since_us: st.since_us,
            elapsed_us: now_us.saturating_sub(st.since_us),
            display_mode: st.display_mode,
            leader: st.leader.current().map(bounded),
            is_leader: st.leader.is_leader(),
        }
    }

    // ── Display mode ──────────────────────────────────────────

    /// Advance to the next display source and return it.
    pub fn cycle_display_mode(&self, sink: &mut impl EventSink) -> DisplayMode {
        let mut st = self.lock();
        st.display_mode = st.display_mode.next();
        sink.emit(&AppEvent::DisplayModeChanged(st.display_mode));
        st.display_mode
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.lock().display_mode
    }

    // ── Leader ────────────────────────────────────────────────

    /// Feed one identity token to the coordinator and actuate under the lock.
    pub fn on_identity(
        &self,
        token: &str,
        alert: &mut impl AlertPort,
        sink: &mut impl EventSink,
    ) -> LeaderUpdate {
        let mut st = self.lock();
        let update = st.leader.on_identity(token);

        if update.leader_changed {
            if let Some(current) = st.leader.current() {
                sink.emit(&AppEvent::LeaderChanged {
                    previous: st.leader.previous().map(bounded),
                    current: bounded(current),
                });
            }
        }
        if update.designation_changed {
            sink.emit(&AppEvent::LeaderDesignated(st.leader.is_leader()));
        }

        match update.action {
            LeaderAction::Pulse(reason) => {
                alert.pulse();
                sink.emit(&AppEvent::AlertPulsed(reason));
            }
            LeaderAction::Silence => alert.silence(),
        }
        update
    }

    /// Set or clear the leader flag without an identity message.
    pub fn set_designated(&self, is_leader: bool, sink: &mut impl EventSink) {
        let mut st = self.lock();
        if st.leader.is_leader() != is_leader {
            st.leader.set_designated(is_leader);
            sink.emit(&AppEvent::LeaderDesignated(is_leader));
        }
    }

    pub fn is_leader(&self) -> bool {
        self.lock().leader.is_leader()
    }

    // ── Shutdown ──────────────────────────────────────────────

    /// Ask every worker loop to return at its next suspension point.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }
}
