//! Leader election by accumulated activity.
//!
//! The collector keeps a tally of how long each collar has reported being
//! active (Wander or Moonwalk). The most active cat leads; ties go to the
//! cat registered first. The collar firmware never runs this; it backs the
//! collector side, which decides whose id to broadcast. Log lines look like:
//!
//! ```text
//!   Port 3333 | ID 7 | Message: 00:03:01, Cat state: Wander Time
//! ```

use heapless::Vec;
use log::warn;

use super::LeaderIdentity;
use crate::config::bounded;
use crate::status::parse_status_line;

/// Collars one collector tracks.
pub const MAX_CATS: usize = 8;

#[derive(Debug, Clone)]
struct CatTally {
    id: LeaderIdentity,
    port: u16,
    active_secs: u64,
}

/// Per-cat active time.
#[derive(Debug, Clone, Default)]
pub struct ActivityTally {
    cats: Vec<CatTally, MAX_CATS>,
}

impl ActivityTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `id`, reporting from `port`. Returns `false` if the id
    /// is already known or the tally is full.
    pub fn register(&mut self, id: &str, port: u16) -> bool {
        if self.find(id).is_some() {
            return false;
        }
        self.cats
            .push(CatTally {
                id: bounded(id),
                port,
                active_secs: 0,
            })
            .is_ok()
    }

    /// Fold one status line from `id` into the tally. Returns `true` when
    /// the line added active time.
    pub fn record(&mut self, id: &str, line: &str) -> bool {
        let Some(report) = parse_status_line(line) else {
            warn!("ELECT | malformed status line from {}: {:?}", id, line);
            return false;
        };
        if !report.state.is_active() {
            return false;
        }
        match self.cats.iter_mut().find(|c| c.id.as_str() == id) {
            Some(cat) => {
                cat.active_secs = cat.active_secs.saturating_add(report.elapsed_secs);
                true
            }
            None => {
                warn!("ELECT | status from unregistered cat {}", id);
                false
            }
        }
    }

    /// Fold one collector log line (`Port N | ... | Message: ...`).
    pub fn record_log_line(&mut self, line: &str) -> bool {
        let mut port = None;
        let mut message = None;
        for part in line.trim().split(" | ") {
            if let Some(p) = part.strip_prefix("Port ") {
                port = p.trim().parse::<u16>().ok();
            } else if let Some(m) = part.strip_prefix("Message: ") {
                message = Some(m.trim());
            }
        }
        let (Some(port), Some(message)) = (port, message) else {
            warn!("ELECT | invalid log line: {:?}", line);
            return false;
        };
        let Some(id) = self.cats.iter().find(|c| c.port == port).map(|c| c.id.clone()) else {
            warn!("ELECT | unknown port {}", port);
            return false;
        };
        self.record(&id, message)
    }

    pub fn active_secs(&self, id: &str) -> Option<u64> {
        self.find(id).map(|c| c.active_secs)
    }

    /// Cat with the strictly greatest active time; earliest registered wins ties.
    pub fn leader(&self) -> Option<&str> {
        let mut best: Option<&CatTally> = None;
        for cat in &self.cats {
            if best.is_none_or(|b| cat.active_secs > b.active_secs) {
                best = Some(cat);
            }
        }
        best.map(|c| c.id.as_str())
    }

    pub fn reset(&mut self) {
        for cat in &mut self.cats {
            cat.active_secs = 0;
        }
    }

    fn find(&self, id: &str) -> Option<&CatTally> {
        self.cats.iter().find(|c| c.id.as_str() == id)
    }
}
