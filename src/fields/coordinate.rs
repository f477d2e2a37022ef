//! Geographic coordinates with range checks.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::validation::{deserialize_validated, ValidationError};

fn check_range(value: f64, min: f64, max: f64) -> Result<f64, ValidationError> {
    // NaN fails both comparisons, so test containment explicitly
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::new(
            "out_of_range",
            format!("{value} must be between {min} and {max}"),
        ))
    }
}

/// A latitude in degrees, within `[-90, 90]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(into = "f64")]
pub struct Latitude(f64);

impl Latitude {
    /// Smallest accepted value.
    pub const MIN: f64 = -90.0;
    /// Largest accepted value.
    pub const MAX: f64 = 90.0;

    /// Creates a latitude.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] with kind `out_of_range` outside `[-90, 90]` or for NaN.
    pub fn new(degrees: f64) -> Result<Self, ValidationError> {
        check_range(degrees, Self::MIN, Self::MAX).map(Self)
    }

    /// Returns the value in degrees.
    #[must_use]
    pub const fn degrees(self) -> f64 {
        self.0
    }
}

/// A longitude in degrees, within `[-180, 180]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(into = "f64")]
pub struct Longitude(f64);

impl Longitude {
    /// Smallest accepted value.
    pub const MIN: f64 = -180.0;
    /// Largest accepted value.
    pub const MAX: f64 = 180.0;

    /// Creates a longitude.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] with kind `out_of_range` outside `[-180, 180]` or for NaN.
    pub fn new(degrees: f64) -> Result<Self, ValidationError> {
        check_range(degrees, Self::MIN, Self::MAX).map(Self)
    }

    /// Returns the value in degrees.
    #[must_use]
    pub const fn degrees(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Latitude {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<f64> for Longitude {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Latitude {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_validated::<D, f64, Self>(deserializer)
    }
}

impl<'de> Deserialize<'de> for Longitude {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_validated::<D, f64, Self>(deserializer)
    }
}

impl From<Latitude> for f64 {
    fn from(value: Latitude) -> Self {
        value.0
    }
}

impl From<Longitude> for f64 {
    fn from(value: Longitude) -> Self {
        value.0
    }
}

impl fmt::Display for Latitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
