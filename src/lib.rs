//! Smart cat collar firmware library.
//!
//! Exposes the pure-logic modules and port-generic worker loops for
//! integration testing on the host. All ESP-IDF-specific code is guarded
//! by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod leader;
pub mod motion;
pub mod pins;
pub mod status;
pub mod tasks;

pub mod adapters;
pub mod drivers;
