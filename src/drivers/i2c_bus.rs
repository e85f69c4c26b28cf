//! Shared I2C master.
//!
//! The accelerometer (sampler task) and the display backpack (display task)
//! sit on one bus. [`SharedBus`] hands each driver a clone that serialises
//! whole transactions through a mutex.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use embedded_hal::i2c::{ErrorType, I2c, Operation};
use heapless::Vec;
use log::info;

/// Cloneable handle to one bus.
pub struct SharedBus<B> {
    bus: Arc<Mutex<B>>,
}

impl<B> SharedBus<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus: Arc::new(Mutex::new(bus)),
        }
    }

    /// Exclusive access to the underlying bus.
    pub fn lock(&self) -> MutexGuard<'_, B> {
        self.bus.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B> Clone for SharedBus<B> {
    fn clone(&self) -> Self {
        Self {
            bus: Arc::clone(&self.bus),
        }
    }
}

impl<B: ErrorType> ErrorType for SharedBus<B> {
    type Error = B::Error;
}

impl<B: I2c> I2c for SharedBus<B> {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.lock().transaction(address, operations)
    }
}

/// Responders this scan can report.
pub const MAX_SCAN_RESULTS: usize = 16;

/// Probe every 7-bit address in `1..127` with an empty write and return
/// the ones that acknowledge.
pub fn scan_bus(bus: &mut impl I2c) -> Vec<u8, MAX_SCAN_RESULTS> {
    let mut found = Vec::new();
    for addr in 1u8..127 {
        if bus.write(addr, &[]).is_ok() {
            info!("I2C device found at 0x{:02X}", addr);
            if found.push(addr).is_err() {
                break;
            }
        }
    }
    info!("I2C scan complete: {} device(s)", found.len());
    found
}
