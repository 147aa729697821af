//! Radio seam and access point front object.
//!
//! The radio stack is reached through the [`ApRadio`] trait, so the whole
//! validate-and-start path runs on the host with a mock radio. The
//! ESP-IDF implementations live behind the `esp32` feature.
//!
//! # Components
//!
//! - [`access_point`] - ESP-IDF soft-AP radio (ESP32 only)
//! - [`station`] - ESP-IDF station driver (ESP32 only)

use std::fmt;

use log::info;

use crate::config::{ApConfigError, ApSettings, ResolvedApConfig};

#[cfg(feature = "esp32")]
mod access_point;
#[cfg(feature = "esp32")]
mod station;

#[cfg(feature = "esp32")]
pub use access_point::{EspApError, EspApRadio};
#[cfg(feature = "esp32")]
pub use station::{Station, StationError};

/// The two operations the underlying radio stack exposes.
///
/// Implementations are opaque to the configuration layer: their failures
/// pass through [`AccessPoint`] unreinterpreted.
pub trait ApRadio {
    type Error: std::error::Error;

    /// Apply the resolved configuration and bring the interface up.
    fn apply_and_start(&mut self, config: &ResolvedApConfig) -> Result<(), Self::Error>;

    /// Bring the interface down.
    fn bring_down(&mut self) -> Result<(), Self::Error>;
}

/// A soft access point: stored settings plus the radio that realizes them.
///
/// [`start`](Self::start) merges per-call options over the stored
/// settings, validates, and hands the result to the radio in one step;
/// nothing reaches the radio unless every field passed.
pub struct AccessPoint<R> {
    settings: ApSettings,
    radio: R,
}

impl<R: ApRadio> AccessPoint<R> {
    /// Create an access point with empty stored settings.
    pub fn new(radio: R) -> Self {
        Self::with_settings(radio, ApSettings::default())
    }

    /// Create an access point with previously configured settings.
    pub fn with_settings(radio: R, settings: ApSettings) -> Self {
        Self { settings, radio }
    }

    /// Stored settings, merged under each start call's options.
    pub fn settings(&self) -> &ApSettings {
        &self.settings
    }

    /// Mutable access to the stored settings.
    pub fn settings_mut(&mut self) -> &mut ApSettings {
        &mut self.settings
    }

    /// The underlying radio.
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Validate `options` against the stored settings and bring the AP up.
    pub fn start(&mut self, options: &ApSettings) -> Result<(), ApError<R::Error>> {
        let resolved = ResolvedApConfig::resolve(options, &self.settings)?;
        info!(
            "starting access point: ssid={} auth={} channel={} max_connections={} hidden={}",
            resolved.ssid,
            resolved.auth_method,
            resolved.channel,
            resolved.max_connections,
            resolved.hidden
        );
        self.radio
            .apply_and_start(&resolved)
            .map_err(ApError::Radio)
    }

    /// Bring the AP down. No validation; delegates straight to the radio.
    pub fn stop(&mut self) -> Result<(), ApError<R::Error>> {
        info!("stopping access point");
        self.radio.bring_down().map_err(ApError::Radio)
    }
}

/// Failures from [`AccessPoint`] operations.
#[derive(Debug)]
pub enum ApError<E> {
    /// The configuration did not resolve.
    Config(ApConfigError),
    /// The radio stack reported a failure.
    Radio(E),
}

impl<E> From<ApConfigError> for ApError<E> {
    fn from(e: ApConfigError) -> Self {
        Self::Config(e)
    }
}

impl<E: fmt::Display> fmt::Display for ApError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {}", e),
            Self::Radio(e) => write!(f, "radio error: {}", e),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for ApError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Radio(e) => Some(e),
        }
    }
}
