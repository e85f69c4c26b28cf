//! In-memory I2C bus for driver unit tests.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

/// Register-file model: a write sets the register pointer from its first
/// byte and stores the rest; reads continue from the pointer.
pub struct MockI2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub registers: [u8; 256],
    present: Vec<u8>,
}

impl MockI2c {
    pub fn with_devices(present: &[u8]) -> Self {
        Self {
            writes: Vec::new(),
            registers: [0; 256],
            present: present.to_vec(),
        }
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        if !self.present.contains(&address) {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        let mut pointer = 0usize;
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.writes.push((address, bytes.to_vec()));
                    if let Some((&reg, data)) = bytes.split_first() {
                        pointer = reg as usize;
                        for (i, b) in data.iter().enumerate() {
                            self.registers[(pointer + i) & 0xFF] = *b;
                        }
                    }
                }
                Operation::Read(buf) => {
                    for (i, b) in buf.iter_mut().enumerate() {
                        *b = self.registers[(pointer + i) & 0xFF];
                    }
                }
            }
        }
        Ok(())
    }
}
