//! Motion classification: accelerometer readings to behavioural state.
//!
//! ```text
//!   ADXL343 ──▶ SampleWindow (mean of N) ──▶ MotionSample ──▶ classify() ──▶ MotionState
//! ```
//!
//! Everything here is pure; the sampler task owns the timing and the
//! shared-state write.

pub mod classifier;
pub mod window;

use core::fmt;

use serde::{Deserialize, Serialize};

pub use classifier::classify;
pub use window::SampleWindow;

/// Degrees per radian, using the firmware's historical approximation.
pub const RAD_TO_DEG: f32 = 57.3;

/// Behavioural state of the cat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    #[default]
    Sleep,
    Wander,
    Moonwalk,
}

impl MotionState {
    /// Label shown on the display and carried in status datagrams.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sleep => "Sleepy Time",
            Self::Wander => "Wander Time",
            Self::Moonwalk => "Moonwalk Time",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Sleepy Time" => Some(Self::Sleep),
            "Wander Time" => Some(Self::Wander),
            "Moonwalk Time" => Some(Self::Moonwalk),
            _ => None,
        }
    }

    /// Wander and Moonwalk count towards leader election; Sleep does not.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Sleep)
    }
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One linear-acceleration reading in m/s².
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Classifier input: orientation in degrees plus raw axes in m/s².
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionSample {
    pub roll: f32,
    pub pitch: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl MotionSample {
    /// Derive roll and pitch from an acceleration vector.
    pub fn from_acceleration(a: Acceleration) -> Self {
        let roll = a.y.atan2(a.z) * RAD_TO_DEG;
        let pitch = (-a.x).atan2((a.y * a.y + a.z * a.z).sqrt()) * RAD_TO_DEG;
        Self {
            roll,
            pitch,
            x: a.x,
            y: a.y,
            z: a.z,
        }
    }

    pub fn classify(&self) -> MotionState {
        classify(self.roll, self.pitch, self.x, self.y, self.z)
    }
}
