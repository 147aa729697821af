//! ESP-IDF station (client) driver.
//!
//! Joins an existing network with a [`StationConfig`]. The credentials are
//! deliberately taken as-is; the radio is the authority on what it can use.

use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::wifi::{
    AuthMethod as EspAuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi,
};
use esp_idf_sys::EspError;
use log::info;

use crate::config::StationConfig;

/// Station-mode driver wrapper.
pub struct Station<'a> {
    wifi: BlockingWifi<EspWifi<'a>>,
}

impl<'a> Station<'a> {
    /// Create a new station driver.
    pub fn new(modem: Modem, sysloop: EspSystemEventLoop) -> Result<Self, EspError> {
        let esp_wifi = EspWifi::new(modem, sysloop.clone(), None)?;
        let wifi = BlockingWifi::wrap(esp_wifi, sysloop)?;
        Ok(Self { wifi })
    }

    /// Join the configured network.
    ///
    /// Blocks through association and DHCP; returns the assigned IP.
    pub fn connect(&mut self, config: &StationConfig) -> Result<String, StationError> {
        info!("joining network: {}", config.ssid);

        let auth_method = if config.is_open() {
            EspAuthMethod::None
        } else {
            EspAuthMethod::WPA2Personal
        };

        let client = ClientConfiguration {
            ssid: config
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| StationError::SsidTooLong)?,
            password: config
                .password
                .as_str()
                .try_into()
                .map_err(|_| StationError::PasswordTooLong)?,
            auth_method,
            ..Default::default()
        };

        self.wifi
            .set_configuration(&Configuration::Client(client))?;
        self.wifi.start()?;
        self.wifi.connect().map_err(StationError::Join)?;
        self.wifi.wait_netif_up().map_err(StationError::Dhcp)?;

        let ip_info = self.wifi.wifi().sta_netif().get_ip_info()?;
        let ip = format!("{}", ip_info.ip);
        info!("joined, IP: {}", ip);
        Ok(ip)
    }

    /// Leave the network and stop the driver.
    pub fn disconnect(&mut self) -> Result<(), EspError> {
        info!("leaving network");
        self.wifi.disconnect()?;
        self.wifi.stop()?;
        Ok(())
    }

    /// Whether the station is associated.
    pub fn is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }

    /// Current IP address, if associated.
    pub fn ip(&self) -> Option<String> {
        if !self.is_connected() {
            return None;
        }
        self.wifi
            .wifi()
            .sta_netif()
            .get_ip_info()
            .ok()
            .map(|info| format!("{}", info.ip))
    }
}

/// Errors from station-mode operations.
#[derive(Debug)]
pub enum StationError {
    /// SSID does not fit the driver's 32-byte field.
    SsidTooLong,
    /// Password does not fit the driver's 64-byte field.
    PasswordTooLong,
    /// Association with the network failed.
    Join(EspError),
    /// DHCP did not produce an address.
    Dhcp(EspError),
    /// ESP-IDF error.
    Esp(EspError),
}

impl From<EspError> for StationError {
    fn from(e: EspError) -> Self {
        Self::Esp(e)
    }
}

impl std::fmt::Display for StationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SsidTooLong => write!(f, "SSID too long for the radio"),
            Self::PasswordTooLong => write!(f, "password too long for the radio"),
            Self::Join(e) => write!(f, "join failed: {:?}", e),
            Self::Dhcp(e) => write!(f, "DHCP failed: {:?}", e),
            Self::Esp(e) => write!(f, "ESP error: {:?}", e),
        }
    }
}

impl std::error::Error for StationError {}
