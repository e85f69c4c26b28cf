//! WiFi station-mode bring-up.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: blocking association via `esp_idf_svc::wifi`.
//! - **all other targets**: only credential validation is compiled.
//!
//! Association is attempted [`MAX_ATTEMPTS`] times. A node that never
//! associates keeps running offline: sampling and display still work, and
//! status datagrams fail and are logged.

use core::fmt;

/// Association attempts before giving up.
pub const MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    InvalidSsid,
    InvalidPassword,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
        }
    }
}

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

pub fn validate_credentials(ssid: &str, password: &str) -> Result<(), CredentialError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(CredentialError::InvalidSsid);
    }
    if !password.is_empty() && (password.len() < 8 || password.len() > 64) {
        return Err(CredentialError::InvalidPassword);
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
pub use platform::connect;

#[cfg(target_os = "espidf")]
mod platform {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::modem::Modem;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
    use log::{info, warn};

    use super::{MAX_ATTEMPTS, validate_credentials};
    use crate::config::SystemConfig;
    use crate::error::{CommsError, Error, Result};

    /// Associate with the configured access point and wait for an IP.
    pub fn connect(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
        config: &SystemConfig,
    ) -> Result<BlockingWifi<EspWifi<'static>>> {
        if let Err(e) = validate_credentials(&config.wifi_ssid, &config.wifi_password) {
            warn!("WiFi: {}", e);
            return Err(Error::Config("invalid WiFi credentials"));
        }

        let esp = EspWifi::new(modem, sysloop.clone(), Some(nvs))
            .map_err(|_| Error::Init("EspWifi::new"))?;
        let mut wifi =
            BlockingWifi::wrap(esp, sysloop).map_err(|_| Error::Init("BlockingWifi::wrap"))?;

        let auth_method = if config.wifi_password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid: config.wifi_ssid.clone(),
            password: config.wifi_password.clone(),
            auth_method,
            ..Default::default()
        }))
        .map_err(|_| Error::Init("wifi configuration"))?;
        wifi.start().map_err(|_| Error::Init("wifi start"))?;

        for attempt in 1..=MAX_ATTEMPTS {
            match wifi.connect().and_then(|()| wifi.wait_netif_up()) {
                Ok(()) => {
                    info!("WiFi: connected to '{}' (attempt {})", config.wifi_ssid, attempt);
                    return Ok(wifi);
                }
                Err(e) => warn!("WiFi: attempt {}/{} failed: {}", attempt, MAX_ATTEMPTS, e),
            }
        }
        Err(CommsError::WifiFailed.into())
    }
}
