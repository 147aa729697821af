//! ESP32 WiFi soft-AP and station library.
//!
//! The configuration layer ([`config`]) is platform-independent and can
//! be tested on the host machine without ESP32 hardware; the ESP-IDF
//! drivers ([`wifi`]) are gated behind the `esp32` cargo feature.

pub mod config;
pub mod wifi;

// Re-export commonly used items
pub use config::{
    ApConfigError, ApSettings, AuthMethod, Encryption, ResolvedApConfig, StationConfig,
};
pub use wifi::{AccessPoint, ApError, ApRadio};

// Re-export ESP-IDF drivers (only with the esp32 feature)
#[cfg(feature = "esp32")]
pub use wifi::{EspApRadio, Station};
