//! Soft-AP configuration and validation.
//!
//! This module contains platform-independent types for access point
//! configuration that can be tested on the host machine.
//!
//! Settings come from two places: per-call options and values previously
//! stored on the access point instance. [`ResolvedApConfig::resolve`]
//! merges them field by field (options win, then stored values, then
//! defaults) and validates the result in a fixed order, failing on the
//! first violation.
//!
//! # Example
//!
//! ```
//! use esp32_wifi::config::{ApSettings, ResolvedApConfig};
//!
//! let mut options = ApSettings::default();
//! options.ssid = Some("Workshop".into());
//!
//! let resolved = ResolvedApConfig::resolve(&options, &ApSettings::default()).unwrap();
//! assert_eq!(resolved.ssid, "Workshop");
//! assert_eq!(resolved.channel, 0); // auto-select
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Stations admitted when no count is configured.
pub const DEFAULT_MAX_CONNECTIONS: u16 = 1;

/// Channel value meaning "let the radio pick".
pub const CHANNEL_AUTO: u8 = 0;

/// Lowest selectable 2.4 GHz channel.
pub const MIN_CHANNEL: u8 = 1;

/// Highest selectable 2.4 GHz channel.
pub const MAX_CHANNEL: u8 = 14;

/// WiFi authentication scheme, identified by a fixed integer code in
/// provisioning payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// No authentication (code 0).
    Open,
    /// WEP (code 2).
    Wep,
    /// WPA-PSK (code 3).
    WpaPsk,
    /// WPA2-PSK (code 4).
    Wpa2Psk,
    /// Mixed WPA/WPA2-PSK (code 5).
    WpaWpa2Psk,
    /// WPA2-Enterprise (code 6). Recognized, but a soft AP cannot be
    /// brought up with it.
    Wpa2Enterprise,
}

impl AuthMethod {
    /// Look up a method by its wire code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Open),
            2 => Some(Self::Wep),
            3 => Some(Self::WpaPsk),
            4 => Some(Self::Wpa2Psk),
            5 => Some(Self::WpaWpa2Psk),
            6 => Some(Self::Wpa2Enterprise),
            _ => None,
        }
    }

    /// The integer code used in provisioning payloads.
    pub fn code(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Wep => 2,
            Self::WpaPsk => 3,
            Self::Wpa2Psk => 4,
            Self::WpaWpa2Psk => 5,
            Self::Wpa2Enterprise => 6,
        }
    }

    /// Whether a soft AP can be brought up with this method.
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Wpa2Enterprise)
    }

    /// Whether the method needs a pre-shared key.
    pub fn requires_psk(self) -> bool {
        matches!(
            self,
            Self::Wep | Self::WpaPsk | Self::Wpa2Psk | Self::WpaWpa2Psk
        )
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::Wep => "WEP",
            Self::WpaPsk => "WPA-PSK",
            Self::Wpa2Psk => "WPA2-PSK",
            Self::WpaWpa2Psk => "WPA/WPA2-PSK",
            Self::Wpa2Enterprise => "WPA2-Enterprise",
        };
        write!(f, "{}", name)
    }
}

/// Encryption section of the settings: scheme code plus optional PSK.
///
/// The PSK is zeroed on drop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Encryption {
    /// Auth method wire code (see [`AuthMethod::from_code`]).
    pub method: Option<u8>,
    /// Pre-shared key; empty counts as unset.
    pub psk: Option<String>,
}

/// Soft-AP settings, used both as the values stored on an access point
/// instance and as the per-call options to
/// [`AccessPoint::start`](crate::wifi::AccessPoint::start).
///
/// Every field is optional so an unset field is distinct from an explicit
/// `false` or `0` and falls through to the stored value or the default.
/// The numeric fields stay raw JSON numbers: provisioning payloads are
/// untyped, and the validator has to tell "not an integer" apart from
/// "out of range".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApSettings {
    /// Advertised network name.
    pub ssid: Option<String>,
    /// Station admission limit.
    pub max_connections: Option<Number>,
    /// Fixed channel in `1..=14`; unset means auto-select.
    pub channel: Option<Number>,
    /// Whether to suppress SSID broadcast.
    pub hidden: Option<bool>,
    /// Auth method and PSK.
    #[serde(default)]
    pub encryption: Encryption,
}

/// Fully validated soft-AP configuration, produced by
/// [`resolve`](Self::resolve) and handed straight to the radio.
///
/// Holding one implies every field passed validation; it is never stored
/// or reused across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedApConfig {
    /// Advertised network name, never empty.
    pub ssid: String,
    /// Authentication scheme, always in the supported set.
    pub auth_method: AuthMethod,
    /// Present whenever the auth method demands one.
    pub psk: Option<String>,
    /// Station admission limit.
    pub max_connections: u16,
    /// [`CHANNEL_AUTO`] or a fixed channel in
    /// [`MIN_CHANNEL`]`..=`[`MAX_CHANNEL`].
    pub channel: u8,
    /// Whether SSID broadcast is suppressed.
    pub hidden: bool,
}

impl ResolvedApConfig {
    /// Merge `options` over `stored` and validate the result.
    ///
    /// Fields resolve independently: a per-call option wins over a stored
    /// value, which wins over the built-in default. A string field counts
    /// as present only when set and non-empty. Checks run in a fixed
    /// order and the first violation aborts the whole resolution, so no
    /// partially valid configuration ever reaches the radio.
    pub fn resolve(options: &ApSettings, stored: &ApSettings) -> Result<Self, ApConfigError> {
        let ssid = present(&options.ssid)
            .or_else(|| present(&stored.ssid))
            .ok_or(ApConfigError::MissingSsid)?
            .to_owned();

        let max_connections = match options
            .max_connections
            .as_ref()
            .or(stored.max_connections.as_ref())
        {
            Some(raw) => {
                let count = raw
                    .as_i64()
                    .ok_or_else(|| ApConfigError::MaxConnectionsNotANumber { value: raw.clone() })?;
                u16::try_from(count)
                    .map_err(|_| ApConfigError::InvalidMaxConnectionCount { count })?
            }
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let auth_method = match options.encryption.method.or(stored.encryption.method) {
            Some(code) => match AuthMethod::from_code(code) {
                Some(method) if method.is_supported() => method,
                _ => return Err(ApConfigError::UnsupportedAuthMethod { code }),
            },
            None => AuthMethod::Open,
        };

        let psk = present(&options.encryption.psk)
            .or_else(|| present(&stored.encryption.psk))
            .map(str::to_owned);
        if auth_method.requires_psk() && psk.is_none() {
            return Err(ApConfigError::PskRequiredByAuthMethod {
                method: auth_method,
            });
        }

        let channel = match options.channel.as_ref().or(stored.channel.as_ref()) {
            Some(raw) => match raw.as_i64() {
                Some(n) if (MIN_CHANNEL as i64..=MAX_CHANNEL as i64).contains(&n) => n as u8,
                _ => return Err(ApConfigError::InvalidChannel { value: raw.clone() }),
            },
            None => CHANNEL_AUTO,
        };

        let hidden = options.hidden.or(stored.hidden).unwrap_or(false);

        Ok(Self {
            ssid,
            auth_method,
            psk,
            max_connections,
            channel,
            hidden,
        })
    }
}

/// A string field counts as present only when set and non-empty.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Reasons a soft-AP configuration fails to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApConfigError {
    /// No SSID in the options, the stored settings, or the defaults.
    MissingSsid,
    /// `max_connections` was supplied but is not an integer.
    MaxConnectionsNotANumber { value: Number },
    /// `max_connections` is negative or beyond what the radio can hold.
    InvalidMaxConnectionCount { count: i64 },
    /// The auth method code is unknown or not usable for a soft AP.
    UnsupportedAuthMethod { code: u8 },
    /// The auth method demands a pre-shared key and none was supplied.
    PskRequiredByAuthMethod { method: AuthMethod },
    /// Channel supplied but not an integer in `1..=14`.
    InvalidChannel { value: Number },
}

impl fmt::Display for ApConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSsid => write!(f, "SSID is required"),
            Self::MaxConnectionsNotANumber { value } => {
                write!(f, "max connections must be an integer, got {}", value)
            }
            Self::InvalidMaxConnectionCount { count } => {
                write!(f, "invalid max connection count: {}", count)
            }
            Self::UnsupportedAuthMethod { code } => {
                write!(f, "unsupported auth method: {}", code)
            }
            Self::PskRequiredByAuthMethod { method } => {
                write!(f, "auth method {} requires a PSK", method)
            }
            Self::InvalidChannel { value } => {
                write!(
                    f,
                    "channel must be an integer in {}..={}, got {}",
                    MIN_CHANNEL, MAX_CHANNEL, value
                )
            }
        }
    }
}

impl std::error::Error for ApConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ssid(ssid: &str) -> ApSettings {
        ApSettings {
            ssid: Some(ssid.to_string()),
            ..Default::default()
        }
    }

    fn int(n: i64) -> Number {
        Number::from(n)
    }

    fn float(n: f64) -> Number {
        Number::from_f64(n).unwrap()
    }

    // ==================== Merge / Precedence Tests ====================

    #[test]
    fn test_option_ssid_overrides_stored() {
        let options = with_ssid("A");
        let stored = with_ssid("B");
        let resolved = ResolvedApConfig::resolve(&options, &stored).unwrap();
        assert_eq!(resolved.ssid, "A");
    }

    #[test]
    fn test_stored_ssid_used_when_option_absent() {
        let resolved = ResolvedApConfig::resolve(&ApSettings::default(), &with_ssid("B")).unwrap();
        assert_eq!(resolved.ssid, "B");
    }

    #[test]
    fn test_empty_option_ssid_falls_through() {
        let options = with_ssid("");
        let resolved = ResolvedApConfig::resolve(&options, &with_ssid("B")).unwrap();
        assert_eq!(resolved.ssid, "B");
    }

    #[test]
    fn test_explicit_false_hidden_does_not_fall_through() {
        let mut options = with_ssid("Net");
        options.hidden = Some(false);
        let mut stored = ApSettings::default();
        stored.hidden = Some(true);
        let resolved = ResolvedApConfig::resolve(&options, &stored).unwrap();
        assert!(!resolved.hidden);
    }

    #[test]
    fn test_stored_hidden_used_when_option_unset() {
        let mut stored = ApSettings::default();
        stored.hidden = Some(true);
        let resolved = ResolvedApConfig::resolve(&with_ssid("Net"), &stored).unwrap();
        assert!(resolved.hidden);
    }

    #[test]
    fn test_option_channel_overrides_stored() {
        let mut options = with_ssid("Net");
        options.channel = Some(int(6));
        let mut stored = ApSettings::default();
        stored.channel = Some(int(11));
        let resolved = ResolvedApConfig::resolve(&options, &stored).unwrap();
        assert_eq!(resolved.channel, 6);
    }

    #[test]
    fn test_encryption_subfields_merge_independently() {
        // Method from the options, PSK from the stored settings.
        let mut options = with_ssid("Net");
        options.encryption.method = Some(AuthMethod::Wpa2Psk.code());
        let mut stored = ApSettings::default();
        stored.encryption.psk = Some("hunter22".to_string());
        let resolved = ResolvedApConfig::resolve(&options, &stored).unwrap();
        assert_eq!(resolved.auth_method, AuthMethod::Wpa2Psk);
        assert_eq!(resolved.psk.as_deref(), Some("hunter22"));
    }

    // ==================== SSID Tests ====================

    #[test]
    fn test_missing_ssid() {
        let result = ResolvedApConfig::resolve(&ApSettings::default(), &ApSettings::default());
        assert_eq!(result, Err(ApConfigError::MissingSsid));
    }

    #[test]
    fn test_empty_ssid_everywhere() {
        let result = ResolvedApConfig::resolve(&with_ssid(""), &with_ssid(""));
        assert_eq!(result, Err(ApConfigError::MissingSsid));
    }

    // ==================== Max Connections Tests ====================

    #[test]
    fn test_max_connections_defaults_to_one() {
        let resolved =
            ResolvedApConfig::resolve(&with_ssid("Net"), &ApSettings::default()).unwrap();
        assert_eq!(resolved.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_max_connections_zero_is_valid() {
        let mut options = with_ssid("Net");
        options.max_connections = Some(int(0));
        let resolved = ResolvedApConfig::resolve(&options, &ApSettings::default()).unwrap();
        assert_eq!(resolved.max_connections, 0);
    }

    #[test]
    fn test_max_connections_negative() {
        let mut options = with_ssid("Net");
        options.max_connections = Some(int(-1));
        let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
        assert_eq!(
            result,
            Err(ApConfigError::InvalidMaxConnectionCount { count: -1 })
        );
    }

    #[test]
    fn test_max_connections_not_an_integer() {
        let mut options = with_ssid("Net");
        options.max_connections = Some(float(2.5));
        let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
        assert!(matches!(
            result,
            Err(ApConfigError::MaxConnectionsNotANumber { .. })
        ));
    }

    #[test]
    fn test_max_connections_beyond_radio_capacity() {
        let mut options = with_ssid("Net");
        options.max_connections = Some(int(70_000));
        let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
        assert_eq!(
            result,
            Err(ApConfigError::InvalidMaxConnectionCount { count: 70_000 })
        );
    }

    // ==================== Auth Method / PSK Tests ====================

    #[test]
    fn test_auth_defaults_to_open() {
        let resolved =
            ResolvedApConfig::resolve(&with_ssid("Net"), &ApSettings::default()).unwrap();
        assert_eq!(resolved.auth_method, AuthMethod::Open);
        assert_eq!(resolved.psk, None);
    }

    #[test]
    fn test_enterprise_is_rejected() {
        let mut options = with_ssid("Net");
        options.encryption.method = Some(AuthMethod::Wpa2Enterprise.code());
        options.encryption.psk = Some("irrelevant".to_string());
        let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
        assert_eq!(result, Err(ApConfigError::UnsupportedAuthMethod { code: 6 }));
    }

    #[test]
    fn test_unknown_auth_code_is_rejected() {
        let mut options = with_ssid("Net");
        options.encryption.method = Some(9);
        let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
        assert_eq!(result, Err(ApConfigError::UnsupportedAuthMethod { code: 9 }));
    }

    #[test]
    fn test_psk_required_methods_without_psk() {
        for method in [
            AuthMethod::Wep,
            AuthMethod::WpaPsk,
            AuthMethod::Wpa2Psk,
            AuthMethod::WpaWpa2Psk,
        ] {
            let mut options = with_ssid("Net");
            options.encryption.method = Some(method.code());
            let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
            assert_eq!(
                result,
                Err(ApConfigError::PskRequiredByAuthMethod { method }),
                "method {} should demand a PSK",
                method
            );
        }
    }

    #[test]
    fn test_psk_required_methods_with_psk() {
        for method in [
            AuthMethod::Wep,
            AuthMethod::WpaPsk,
            AuthMethod::Wpa2Psk,
            AuthMethod::WpaWpa2Psk,
        ] {
            let mut options = with_ssid("Net");
            options.encryption.method = Some(method.code());
            options.encryption.psk = Some("secret123".to_string());
            let resolved = ResolvedApConfig::resolve(&options, &ApSettings::default()).unwrap();
            assert_eq!(resolved.auth_method, method);
            assert_eq!(resolved.psk.as_deref(), Some("secret123"));
        }
    }

    #[test]
    fn test_empty_psk_counts_as_missing() {
        let mut options = with_ssid("Net");
        options.encryption.method = Some(AuthMethod::Wpa2Psk.code());
        options.encryption.psk = Some(String::new());
        let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
        assert_eq!(
            result,
            Err(ApConfigError::PskRequiredByAuthMethod {
                method: AuthMethod::Wpa2Psk
            })
        );
    }

    // ==================== Channel Tests ====================

    #[test]
    fn test_channel_defaults_to_auto() {
        let resolved =
            ResolvedApConfig::resolve(&with_ssid("Net"), &ApSettings::default()).unwrap();
        assert_eq!(resolved.channel, CHANNEL_AUTO);
    }

    #[test]
    fn test_channel_bounds_are_valid() {
        for channel in [MIN_CHANNEL, MAX_CHANNEL] {
            let mut options = with_ssid("Net");
            options.channel = Some(int(channel as i64));
            let resolved = ResolvedApConfig::resolve(&options, &ApSettings::default()).unwrap();
            assert_eq!(resolved.channel, channel);
        }
    }

    #[test]
    fn test_channel_out_of_range() {
        let mut options = with_ssid("Net");
        options.channel = Some(int(15));
        let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
        assert!(matches!(result, Err(ApConfigError::InvalidChannel { .. })));
    }

    #[test]
    fn test_channel_not_an_integer() {
        let mut options = with_ssid("Net");
        options.channel = Some(float(0.5));
        let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
        assert!(matches!(result, Err(ApConfigError::InvalidChannel { .. })));
    }

    #[test]
    fn test_explicit_zero_channel_is_rejected() {
        // Only an absent channel means auto; an explicit 0 is present and
        // outside 1..=14.
        let mut options = with_ssid("Net");
        options.channel = Some(int(0));
        let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
        assert!(matches!(result, Err(ApConfigError::InvalidChannel { .. })));
    }

    // ==================== Ordering / End-to-End Tests ====================

    #[test]
    fn test_first_violation_wins() {
        // Both the SSID and the channel are bad; the SSID check runs first.
        let mut options = ApSettings::default();
        options.channel = Some(int(99));
        let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
        assert_eq!(result, Err(ApConfigError::MissingSsid));

        // Both max_connections and the auth method are bad; max_connections
        // is checked before auth.
        let mut options = with_ssid("Net");
        options.max_connections = Some(float(1.5));
        options.encryption.method = Some(9);
        let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
        assert!(matches!(
            result,
            Err(ApConfigError::MaxConnectionsNotANumber { .. })
        ));
    }

    #[test]
    fn test_full_resolution() {
        let options: ApSettings = serde_json::from_str(
            r#"{
                "ssid": "Home",
                "max_connections": 4,
                "channel": 6,
                "encryption": { "method": 4, "psk": "secret123" }
            }"#,
        )
        .unwrap();
        let resolved = ResolvedApConfig::resolve(&options, &ApSettings::default()).unwrap();
        assert_eq!(
            resolved,
            ResolvedApConfig {
                ssid: "Home".to_string(),
                auth_method: AuthMethod::Wpa2Psk,
                psk: Some("secret123".to_string()),
                max_connections: 4,
                channel: 6,
                hidden: false,
            }
        );
    }

    #[test]
    fn test_json_fractional_max_connections() {
        let options: ApSettings =
            serde_json::from_str(r#"{"ssid": "Home", "max_connections": 2.5}"#).unwrap();
        let result = ResolvedApConfig::resolve(&options, &ApSettings::default());
        assert!(matches!(
            result,
            Err(ApConfigError::MaxConnectionsNotANumber { .. })
        ));
    }

    // ==================== AuthMethod Tests ====================

    #[test]
    fn test_auth_code_round_trip() {
        for code in [0u8, 2, 3, 4, 5, 6] {
            let method = AuthMethod::from_code(code).unwrap();
            assert_eq!(method.code(), code);
        }
        assert_eq!(AuthMethod::from_code(1), None);
        assert_eq!(AuthMethod::from_code(7), None);
    }

    #[test]
    fn test_open_needs_no_psk() {
        assert!(!AuthMethod::Open.requires_psk());
        assert!(AuthMethod::Open.is_supported());
    }
}
