//! HT16K33 14-segment backpack (4 alphanumeric cells).
//!
//! ## Wire contract
//!
//! A frame is one I2C write of nine bytes to address 0x70: the display
//! RAM pointer `0x00`, then each cell's glyph low byte first.
//!
//! ```text
//!   [0x00, lo0, hi0, lo1, hi1, lo2, hi2, lo3, hi3]
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::info;

use crate::app::ports::FrameSink;
use crate::display::{BLANK_FRAME, GlyphFrame, VISIBLE_WIDTH};
use crate::error::{DisplayError, Result};

pub const HT16K33_ADDR: u8 = 0x70;

const CMD_OSCILLATOR_ON: u8 = 0x21;
/// Display on, blinking off.
const CMD_DISPLAY_ON: u8 = 0x81;
const CMD_BRIGHTNESS: u8 = 0xE0;
/// Settle time after each setup command.
const SETTLE_MS: u32 = 200;
const DISPLAY_RAM: u8 = 0x00;

pub const FRAME_BYTES: usize = 1 + VISIBLE_WIDTH * 2;

/// Serialise a frame into the backpack's write format.
pub fn frame_bytes(frame: &GlyphFrame) -> [u8; FRAME_BYTES] {
    let mut out = [0u8; FRAME_BYTES];
    out[0] = DISPLAY_RAM;
    for (i, glyph) in frame.iter().enumerate() {
        let [lo, hi] = glyph.to_le_bytes();
        out[1 + i * 2] = lo;
        out[2 + i * 2] = hi;
    }
    out
}

pub struct Ht16k33<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ht16k33<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: HT16K33_ADDR,
        }
    }

    /// Start the oscillator, enable the display and set brightness (0-15).
    pub fn init(&mut self, brightness: u8, delay: &mut impl DelayNs) -> Result<()> {
        for cmd in [
            CMD_OSCILLATOR_ON,
            CMD_DISPLAY_ON,
            CMD_BRIGHTNESS | brightness.min(15),
        ] {
            self.command(cmd)?;
            delay.delay_ms(SETTLE_MS);
        }
        info!("HT16K33 ready at 0x{:02X} (brightness {})", self.address, brightness.min(15));
        Ok(())
    }

    pub fn set_brightness(&mut self, level: u8) -> Result<()> {
        self.command(CMD_BRIGHTNESS | level.min(15))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.write_frame(&BLANK_FRAME)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn command(&mut self, cmd: u8) -> Result<()> {
        self.i2c
            .write(self.address, &[cmd])
            .map_err(|_| DisplayError::BusFault.into())
    }
}

impl<I2C: I2c> FrameSink for Ht16k33<I2C> {
    fn write_frame(&mut self, frame: &GlyphFrame) -> Result<()> {
        self.i2c
            .write(self.address, &frame_bytes(frame))
            .map_err(|_| DisplayError::BusFault.into())
    }
}
