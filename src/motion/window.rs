//! Moving-average window over accelerometer readings.

use heapless::Vec;

use super::{Acceleration, MotionSample};
use crate::config::MAX_SAMPLES_PER_WINDOW;

/// Collects up to `capacity` readings and yields their arithmetic mean.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    readings: Vec<Acceleration, { MAX_SAMPLES_PER_WINDOW as usize }>,
    capacity: usize,
}

impl SampleWindow {
    /// `capacity` is clamped to `1..=MAX_SAMPLES_PER_WINDOW`.
    pub fn new(capacity: u8) -> Self {
        Self {
            readings: Vec::new(),
            capacity: capacity.clamp(1, MAX_SAMPLES_PER_WINDOW) as usize,
        }
    }

    /// Add a reading. Returns `false` once the window is full.
    pub fn push(&mut self, a: Acceleration) -> bool {
        if self.is_full() {
            return false;
        }
        self.readings.push(a).is_ok()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.readings.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Mean of the collected readings, `None` if nothing was collected.
    pub fn average(&self) -> Option<Acceleration> {
        if self.readings.is_empty() {
            return None;
        }
        let n = self.readings.len() as f32;
        let sum = self.readings.iter().fold(Acceleration::default(), |acc, r| Acceleration {
            x: acc.x + r.x,
            y: acc.y + r.y,
            z: acc.z + r.z,
        });
        Some(Acceleration {
            x: sum.x / n,
            y: sum.y / n,
            z: sum.z / n,
        })
    }

    /// Classifier input derived from the window mean.
    pub fn sample(&self) -> Option<MotionSample> {
        self.average().map(MotionSample::from_acceleration)
    }

    pub fn clear(&mut self) {
        self.readings.clear();
    }
}
