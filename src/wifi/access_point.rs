//! ESP-IDF soft-AP radio.
//!
//! Thin wrapper over the ESP-IDF WiFi driver: takes an already-resolved
//! configuration and realizes it on the hardware. All policy lives in the
//! configuration layer; this module only translates and applies.

use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::wifi::{
    AccessPointConfiguration, AuthMethod as EspAuthMethod, BlockingWifi, Configuration, EspWifi,
};
use esp_idf_sys::EspError;
use log::info;

use super::ApRadio;
use crate::config::{AuthMethod, ResolvedApConfig};

/// Soft-AP radio backed by the ESP-IDF WiFi driver.
pub struct EspApRadio<'a> {
    wifi: BlockingWifi<EspWifi<'a>>,
}

impl<'a> EspApRadio<'a> {
    /// Create a new soft-AP radio.
    pub fn new(modem: Modem, sysloop: EspSystemEventLoop) -> Result<Self, EspError> {
        let esp_wifi = EspWifi::new(modem, sysloop.clone(), None)?;
        let wifi = BlockingWifi::wrap(esp_wifi, sysloop)?;
        Ok(Self { wifi })
    }

    /// IP address of the AP interface, if up.
    pub fn ip(&self) -> Option<String> {
        self.wifi
            .wifi()
            .ap_netif()
            .get_ip_info()
            .ok()
            .map(|info| format!("{}", info.ip))
    }
}

impl ApRadio for EspApRadio<'_> {
    type Error = EspApError;

    fn apply_and_start(&mut self, config: &ResolvedApConfig) -> Result<(), EspApError> {
        let mut ap = AccessPointConfiguration {
            ssid: config
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| EspApError::SsidTooLong)?,
            auth_method: esp_auth_method(config.auth_method),
            max_connections: config.max_connections,
            ssid_hidden: config.hidden,
            ..Default::default()
        };
        if let Some(psk) = config.psk.as_deref() {
            ap.password = psk.try_into().map_err(|_| EspApError::PskTooLong)?;
        }
        // Channel 0 means auto-select; leave the driver default in place.
        if config.channel > 0 {
            ap.channel = config.channel;
        }

        self.wifi
            .set_configuration(&Configuration::AccessPoint(ap))?;
        self.wifi.start()?;
        self.wifi.wait_netif_up()?;

        info!("access point up: ssid={}", config.ssid);
        Ok(())
    }

    fn bring_down(&mut self) -> Result<(), EspApError> {
        info!("access point going down");
        self.wifi.stop()?;
        Ok(())
    }
}

/// Map the configuration-level auth method to the driver's.
fn esp_auth_method(method: AuthMethod) -> EspAuthMethod {
    match method {
        AuthMethod::Open => EspAuthMethod::None,
        AuthMethod::Wep => EspAuthMethod::WEP,
        AuthMethod::WpaPsk => EspAuthMethod::WPA,
        AuthMethod::Wpa2Psk => EspAuthMethod::WPA2Personal,
        AuthMethod::WpaWpa2Psk => EspAuthMethod::WPAWPA2Personal,
        // The validator never lets this through; map it faithfully anyway.
        AuthMethod::Wpa2Enterprise => EspAuthMethod::WPA2Enterprise,
    }
}

/// Errors from the ESP-IDF soft-AP radio.
#[derive(Debug)]
pub enum EspApError {
    /// SSID does not fit the driver's 32-byte field.
    SsidTooLong,
    /// PSK does not fit the driver's 64-byte field.
    PskTooLong,
    /// ESP-IDF error.
    Esp(EspError),
}

impl From<EspError> for EspApError {
    fn from(e: EspError) -> Self {
        Self::Esp(e)
    }
}

impl std::fmt::Display for EspApError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SsidTooLong => write!(f, "SSID too long for the radio"),
            Self::PskTooLong => write!(f, "PSK too long for the radio"),
            Self::Esp(e) => write!(f, "ESP error: {:?}", e),
        }
    }
}

impl std::error::Error for EspApError {}
