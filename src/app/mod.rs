//! Application core — domain state and the ports it talks through.
//!
//! The worker tasks in [`crate::tasks`] drive everything; this module holds
//! what they share. All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! real peripherals.

pub mod events;
pub mod ports;
pub mod state;

pub use state::{SharedState, Snapshot};
