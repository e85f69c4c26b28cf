//! Mock hardware for integration tests.
//!
//! `SimBus` models each I2C device as a 256-byte register file keyed by
//! address and records every write, so tests can assert on the exact
//! bytes a driver put on the wire. The other mocks are `Send` so they can
//! be moved into worker threads.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use catcollar::app::events::AppEvent;
use catcollar::app::ports::{AlertPort, Clock, EventSink};
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

// ── I2C bus ───────────────────────────────────────────────────

#[derive(Default)]
pub struct SimBus {
    devices: HashMap<u8, [u8; 256]>,
    pub writes: Vec<(u8, Vec<u8>)>,
}

#[allow(dead_code)]
impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, address: u8) -> &mut [u8; 256] {
        self.devices.entry(address).or_insert([0; 256])
    }

    pub fn registers(&self, address: u8) -> Option<&[u8; 256]> {
        self.devices.get(&address)
    }

    /// Writes addressed to one device, oldest first.
    pub fn writes_to(&self, address: u8) -> Vec<Vec<u8>> {
        self.writes
            .iter()
            .filter(|(a, _)| *a == address)
            .map(|(_, bytes)| bytes.clone())
            .collect()
    }
}

impl ErrorType for SimBus {
    type Error = ErrorKind;
}

impl I2c for SimBus {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        let Some(regs) = self.devices.get_mut(&address) else {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        };
        let mut pointer = 0usize;
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.writes.push((address, bytes.to_vec()));
                    if let Some((&reg, data)) = bytes.split_first() {
                        pointer = reg as usize;
                        for (i, b) in data.iter().enumerate() {
                            regs[(pointer + i) & 0xFF] = *b;
                        }
                    }
                }
                Operation::Read(buf) => {
                    for (i, b) in buf.iter_mut().enumerate() {
                        *b = regs[(pointer + i) & 0xFF];
                    }
                }
            }
        }
        Ok(())
    }
}

/// Store one axis triple in ADXL343 DATAX0..DATAZ1 as raw LSB counts.
#[allow(dead_code)]
pub fn set_adxl_raw(regs: &mut [u8; 256], x: i16, y: i16, z: i16) {
    for (i, v) in [x, y, z].into_iter().enumerate() {
        let [lo, hi] = v.to_le_bytes();
        regs[0x32 + i * 2] = lo;
        regs[0x33 + i * 2] = hi;
    }
}

// ── Clock ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockClock(Arc<AtomicU64>);

#[allow(dead_code)]
impl MockClock {
    pub fn set_us(&self, us: u64) {
        self.0.store(us, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_us(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingSink(Arc<Mutex<Vec<AppEvent>>>);

#[allow(dead_code)]
impl RecordingSink {
    pub fn events(&self) -> Vec<AppEvent> {
        self.0.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

// ── Buzzer ────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct CountingAlert {
    pulses: Arc<AtomicUsize>,
    silences: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl CountingAlert {
    pub fn pulses(&self) -> usize {
        self.pulses.load(Ordering::SeqCst)
    }

    pub fn silences(&self) -> usize {
        self.silences.load(Ordering::SeqCst)
    }
}

impl AlertPort for CountingAlert {
    fn pulse(&mut self) {
        self.pulses.fetch_add(1, Ordering::SeqCst);
    }

    fn silence(&mut self) {
        self.silences.fetch_add(1, Ordering::SeqCst);
    }
}

// ── Button pin ────────────────────────────────────────────────

/// Replays a level script, then stays high (released).
pub struct ScriptedPin(pub Vec<bool>);

impl PinErrorType for ScriptedPin {
    type Error = Infallible;
}

impl InputPin for ScriptedPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(if self.0.is_empty() { true } else { self.0.remove(0) })
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|h| !h)
    }
}
