//! Peripheral drivers and thread helpers.

pub mod adxl343;
pub mod button;
pub mod buzzer;
pub mod delay;
pub mod ht16k33;
pub mod i2c_bus;
pub mod task_pin;

#[cfg(test)]
pub(crate) mod mock_bus;
