//! GPIO pin assignments for the collar board (ESP32 DevKit).
//!
//! | Signal      | GPIO | Notes                               |
//! |-------------|------|-------------------------------------|
//! | Mode button | 15   | Active-low, pulled up               |
//! | Buzzer      | 33   | Piezo driver, active-high           |
//! | I2C SCL     | 22   | ADXL343 + HT16K33 share the bus     |
//! | I2C SDA     | 23   |                                     |

// ── Inputs ────────────────────────────────────────────────────

pub const BUTTON_GPIO: i32 = 15;

// ── Outputs ───────────────────────────────────────────────────

pub const BUZZER_GPIO: i32 = 33;

// ── I2C master ────────────────────────────────────────────────

pub const I2C_SCL_GPIO: i32 = 22;
pub const I2C_SDA_GPIO: i32 = 23;
/// Standard-mode clock.
pub const I2C_FREQ_HZ: u32 = 100_000;
