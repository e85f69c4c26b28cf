//! ADXL343 3-axis accelerometer over I2C.
//!
//! Only the registers the collar needs are exposed: identification,
//! measurement enable, range selection and the six-byte data burst.
//! Readings are returned in m/s² assuming full-resolution mode, where one
//! LSB is 4 mg at every range.

use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::app::ports::AccelerometerPort;
use crate::error::{Result, SensorError};
use crate::motion::Acceleration;

pub const ADXL343_ADDR: u8 = 0x53;
/// Value of `REG_DEVID` on a genuine part.
pub const DEVICE_ID: u8 = 0xE5;

const REG_DEVID: u8 = 0x00;
const REG_BW_RATE: u8 = 0x2C;
const REG_POWER_CTL: u8 = 0x2D;
const REG_INT_ENABLE: u8 = 0x2E;
const REG_DATA_FORMAT: u8 = 0x31;
const REG_DATAX0: u8 = 0x32;

const POWER_CTL_MEASURE: u8 = 0x08;
const DATA_FORMAT_FULL_RES: u8 = 0x08;

/// g per LSB in full-resolution mode.
pub const MG2G_MULTIPLIER: f32 = 0.004;
pub const STANDARD_GRAVITY: f32 = 9.80665;

/// Full-scale measurement range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Range {
    G2 = 0b00,
    G4 = 0b01,
    G8 = 0b10,
    G16 = 0b11,
}

impl Range {
    pub fn from_g(g: u8) -> Option<Self> {
        match g {
            2 => Some(Self::G2),
            4 => Some(Self::G4),
            8 => Some(Self::G8),
            16 => Some(Self::G16),
            _ => None,
        }
    }

    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::G2,
            0b01 => Self::G4,
            0b10 => Self::G8,
            _ => Self::G16,
        }
    }
}

pub struct Adxl343<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Adxl343<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: ADXL343_ADDR,
        }
    }

    pub fn device_id(&mut self) -> Result<u8> {
        self.read_register(REG_DEVID)
    }

    /// `true` when the part answers with the expected id. Bus errors and
    /// wrong ids are logged and reported as `false`.
    pub fn probe(&mut self) -> bool {
        match self.device_id() {
            Ok(DEVICE_ID) => {
                info!("ADXL343 found at 0x{:02X}", self.address);
                true
            }
            Ok(id) => {
                warn!("ADXL343: {}", SensorError::WrongDevice(id));
                false
            }
            Err(e) => {
                warn!("ADXL343 probe failed: {}", e);
                false
            }
        }
    }

    /// Disable interrupts and start measuring.
    pub fn init(&mut self) -> Result<()> {
        self.write_register(REG_INT_ENABLE, 0)?;
        self.write_register(REG_POWER_CTL, POWER_CTL_MEASURE)
    }

    /// Select the range, keeping the upper DATA_FORMAT bits and forcing
    /// full resolution.
    pub fn set_range(&mut self, range: Range) -> Result<()> {
        let mut format = self.read_register(REG_DATA_FORMAT)?;
        format &= !0x0F;
        format |= range as u8;
        format |= DATA_FORMAT_FULL_RES;
        self.write_register(REG_DATA_FORMAT, format)
    }

    pub fn range(&mut self) -> Result<Range> {
        self.read_register(REG_DATA_FORMAT).map(Range::from_bits)
    }

    /// Output data rate code (BW_RATE low nibble).
    pub fn data_rate(&mut self) -> Result<u8> {
        self.read_register(REG_BW_RATE).map(|r| r & 0x0F)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register(&mut self, reg: u8) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|_| SensorError::BusFault)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|_| SensorError::BusFault.into())
    }
}

fn scale(lo: u8, hi: u8) -> f32 {
    f32::from(i16::from_le_bytes([lo, hi])) * MG2G_MULTIPLIER * STANDARD_GRAVITY
}

impl<I2C: I2c> AccelerometerPort for Adxl343<I2C> {
    fn read_acceleration(&mut self) -> Result<Acceleration> {
        let mut raw = [0u8; 6];
        self.i2c
            .write_read(self.address, &[REG_DATAX0], &mut raw)
            .map_err(|_| SensorError::BusFault)?;
        Ok(Acceleration {
            x: scale(raw[0], raw[1]),
            y: scale(raw[2], raw[3]),
            z: scale(raw[4], raw[5]),
        })
    }
}
