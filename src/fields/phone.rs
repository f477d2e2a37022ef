//! Phone numbers normalized to E.164.

use std::fmt;
use std::str::FromStr;

use phonenumber::country;
use serde::{Deserialize, Deserializer, Serialize};

use crate::validation::{deserialize_validated, ValidationError};

/// Region assumed when a number carries no country code.
pub const DEFAULT_REGION: country::Id = country::Id::MX;

/// A validated phone number in E.164 form (`+525512345678`).
///
/// Numbers without a leading `+` and country code are read as Mexican
/// numbers.
///
/// # Example
///
/// ```rust
/// use uberdirect::fields::PhoneNumber;
///
/// let phone: PhoneNumber = "55 1234 5678".parse().unwrap();
/// assert_eq!(phone.as_ref(), "+525512345678");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parses and validates a phone number, applying [`DEFAULT_REGION`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] with kind `value_error` if the input is
    /// not a valid phone number.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Self::parse_with_region(input, DEFAULT_REGION)
    }

    /// Parses and validates a phone number with an explicit default region.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] with kind `value_error` if the input is
    /// not a valid phone number.
    pub fn parse_with_region(input: &str, region: country::Id) -> Result<Self, ValidationError> {
        let number = phonenumber::parse(Some(region), input).map_err(|e| {
            ValidationError::new("value_error", format!("value is not a valid phone number: {e}"))
        })?;

        if !phonenumber::is_valid(&number) {
            return Err(ValidationError::new(
                "value_error",
                "value is not a valid phone number",
            ));
        }

        Ok(Self(
            number.format().mode(phonenumber::Mode::E164).to_string(),
        ))
    }
}

impl FromStr for PhoneNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_validated::<D, String, Self>(deserializer)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
