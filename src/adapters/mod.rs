//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements     | Connects to              |
//! |------------|----------------|--------------------------|
//! | `log_sink` | EventSink      | Serial log output        |
//! | `time`     | Clock          | ESP32 high-res timer     |
//! | `udp`      | EventSink      | Status collector (UDP)   |
//! |            | IdentitySource | Leader broadcasts (UDP)  |
//! | `wifi`     | —              | ESP-IDF WiFi STA         |

pub mod log_sink;
pub mod time;
pub mod udp;
pub mod wifi;
