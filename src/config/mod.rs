//! Configuration types.
//!
//! This module provides the platform-independent configuration layer:
//! soft-AP settings with their validator/builder, and the trivial station
//! credentials type.
//!
//! # Components
//!
//! - [`access_point`] - soft-AP settings, merge/validation, error kinds
//! - [`station`] - station (client) credentials, unvalidated
//!
//! Everything here is host-testable; nothing touches ESP-IDF.

mod access_point;
mod station;

pub use access_point::{
    ApConfigError, ApSettings, AuthMethod, Encryption, ResolvedApConfig, CHANNEL_AUTO,
    DEFAULT_MAX_CONNECTIONS, MAX_CHANNEL, MIN_CHANNEL,
};
pub use station::StationConfig;
