//! System configuration parameters
//!
//! All tunable parameters for the collar. Defaults match the deployed
//! hardware; a (partial) JSON document can override any subset of fields.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::leader::LeaderIdentity;

/// Longest averaging window the sampler supports.
pub const MAX_SAMPLES_PER_WINDOW: u8 = 16;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Identity ---
    /// This collar's identity token, compared against inbound leader ids
    pub node_id: LeaderIdentity,

    // --- Network ---
    pub wifi_ssid: String<32>,
    pub wifi_password: String<64>,
    /// Status collector host (IPv4 literal or hostname)
    pub status_host: String<64>,
    pub status_port: u16,
    /// Local port the identity listener binds to
    pub identity_port: u16,

    // --- Sampling ---
    /// Delay between accelerometer reads (milliseconds)
    pub sample_interval_ms: u32,
    /// Readings averaged into one classification
    pub samples_per_window: u8,
    /// Accelerometer full-scale range in g (2, 4, 8 or 16)
    pub accel_range_g: u8,

    // --- Display ---
    pub banner: String<16>,
    /// Hold time of each scroll frame (milliseconds)
    pub scroll_frame_ms: u32,
    /// Delay between display refreshes (milliseconds)
    pub display_refresh_ms: u32,
    /// HT16K33 dimming level (0-15)
    pub brightness: u8,

    // --- Alerts / input ---
    pub buzz_on_ms: u32,
    pub buzz_off_ms: u32,
    pub button_poll_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            node_id: bounded("3"),

            wifi_ssid: String::new(),
            wifi_password: String::new(),
            status_host: bounded("192.168.1.103"),
            status_port: 3335,
            identity_port: 3335,

            sample_interval_ms: 500, // 4 x 500 ms ~ 2 s window
            samples_per_window: 4,
            accel_range_g: 2,

            banner: bounded("Boots and Cats"),
            scroll_frame_ms: 300,
            display_refresh_ms: 100,
            brightness: 15,

            buzz_on_ms: 500,
            buzz_off_ms: 500,
            button_poll_ms: 10,
        }
    }
}

impl SystemConfig {
    /// Parse a JSON override on top of the defaults and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the firmware cannot run with. Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if self.node_id.is_empty() {
            return Err(Error::Config("node_id must not be empty"));
        }
        if self.status_port == 0 || self.identity_port == 0 {
            return Err(Error::Config("ports must be non-zero"));
        }
        if self.sample_interval_ms == 0
            || self.scroll_frame_ms == 0
            || self.display_refresh_ms == 0
            || self.button_poll_ms == 0
        {
            return Err(Error::Config("intervals must be non-zero"));
        }
        if self.samples_per_window == 0 || self.samples_per_window > MAX_SAMPLES_PER_WINDOW {
            return Err(Error::Config("samples_per_window must be 1..=16"));
        }
        if !matches!(self.accel_range_g, 2 | 4 | 8 | 16) {
            return Err(Error::Config("accel_range_g must be 2, 4, 8 or 16"));
        }
        if self.brightness > 15 {
            return Err(Error::Config("brightness must be 0..=15"));
        }
        Ok(())
    }
}

/// Copy `s` into a bounded string, cutting at the last char boundary that fits.
pub fn bounded<const N: usize>(s: &str) -> String<N> {
    let mut end = s.len().min(N);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::new();
    // Cannot fail: `end <= N`.
    let _ = out.push_str(&s[..end]);
    out
}
