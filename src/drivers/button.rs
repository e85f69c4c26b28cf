//! Mode button edge detector.
//!
//! Active-low momentary switch with a pull-up, debounced externally. The
//! input task samples the level every few milliseconds; a high→low
//! transition is one press.

/// Remembers the last sampled level.
#[derive(Debug, Clone, Copy)]
pub struct ModeButton {
    was_high: bool,
}

impl Default for ModeButton {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeButton {
    /// Starts released (high).
    pub fn new() -> Self {
        Self { was_high: true }
    }

    /// Feed one level sample. Returns `true` on a press.
    pub fn poll(&mut self, level_high: bool) -> bool {
        let pressed = self.was_high && !level_high;
        self.was_high = level_high;
        pressed
    }
}
