//! Uber Direct API version definitions.
//!
//! This module provides [`ApiVersion`] for the delivery API path segment
//! and [`OAuthVersion`] for the token endpoint.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Delivery API version.
///
/// # Example
///
/// ```rust
/// use uberdirect::ApiVersion;
///
/// let version: ApiVersion = "v1".parse().unwrap();
/// assert_eq!(version, ApiVersion::V1);
/// assert_eq!(format!("{}", ApiVersion::V1), "v1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    /// API version v1.
    #[default]
    V1,
    /// Custom version string for future versions (e.g. `v2`).
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest known API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V1
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::Custom(s) => f.write_str(s),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "v1" => Ok(Self::V1),
            _ if is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}

/// OAuth token endpoint version.
///
/// # Example
///
/// ```rust
/// use uberdirect::OAuthVersion;
///
/// assert_eq!(OAuthVersion::default().to_string(), "v2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum OAuthVersion {
    /// OAuth version v2.
    #[default]
    V2,
    /// Custom version string.
    Custom(String),
}

impl fmt::Display for OAuthVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V2 => f.write_str("v2"),
            Self::Custom(s) => f.write_str(s),
        }
    }
}

impl FromStr for OAuthVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "v2" => Ok(Self::V2),
            _ if is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}

// Format: "v" followed by one or more digits
fn is_valid_version_format(s: &str) -> bool {
    s.strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}
