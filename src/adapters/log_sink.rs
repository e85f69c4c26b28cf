//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one tagged line per application
//! event to the logger (UART / USB-CDC in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::status::format_elapsed;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { node_id, state } => {
                info!("START | node={} | state={}", node_id, state);
            }
            AppEvent::MotionChanged {
                from,
                to,
                elapsed_secs,
            } => {
                info!(
                    "MOTION | {} -> {} | after {}",
                    from,
                    to,
                    format_elapsed(*elapsed_secs)
                );
            }
            AppEvent::LeaderChanged { previous, current } => {
                info!(
                    "LEADER | {} -> {}",
                    previous.as_deref().unwrap_or("-"),
                    current
                );
            }
            AppEvent::LeaderDesignated(is_leader) => {
                info!(
                    "LEADER | this node {}",
                    if *is_leader { "leads" } else { "follows" }
                );
            }
            AppEvent::AlertPulsed(reason) => {
                info!("ALERT | buzz ({:?})", reason);
            }
            AppEvent::DisplayModeChanged(mode) => {
                info!("MODE | {:?}", mode);
            }
        }
    }
}
