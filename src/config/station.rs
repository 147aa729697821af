//! Station (client) mode credentials.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Credentials for joining an existing network.
///
/// Deliberately unvalidated: the radio rejects what it cannot use. The
/// password is zeroed on drop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct StationConfig {
    /// Network SSID.
    pub ssid: String,
    /// Network password; empty for open networks.
    pub password: String,
}

impl StationConfig {
    pub fn new(ssid: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            password: password.into(),
        }
    }

    /// Whether this targets an open network (no password).
    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_network() {
        assert!(StationConfig::new("Net", "").is_open());
        assert!(!StationConfig::new("Net", "password123").is_open());
    }
}
