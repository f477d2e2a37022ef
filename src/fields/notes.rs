//! Free-text courier instructions.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::validation::{deserialize_validated, ValidationError};

/// Free text shown to the courier, at most [`Notes::MAX_CHARS`] characters.
///
/// ```rust
/// use uberdirect::fields::Notes;
///
/// assert!(Notes::new("Ring twice").is_ok());
/// assert!(Notes::new("x".repeat(281)).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Notes(String);

impl Notes {
    /// Maximum length in characters.
    pub const MAX_CHARS: usize = 280;

    /// Creates notes.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] with kind `too_long` above 280 characters.
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        let length = text.chars().count();
        if length > Self::MAX_CHARS {
            return Err(ValidationError::new(
                "too_long",
                format!(
                    "must have at most {} characters, got {length}",
                    Self::MAX_CHARS
                ),
            ));
        }
        Ok(Self(text))
    }
}

impl TryFrom<String> for Notes {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Notes {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Notes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_validated::<D, String, Self>(deserializer)
    }
}

impl From<Notes> for String {
    fn from(notes: Notes) -> Self {
        notes.0
    }
}

impl AsRef<str> for Notes {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Notes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        assert!(Notes::new("ñ".repeat(280)).is_ok());
        let error = Notes::new("ñ".repeat(281)).unwrap_err();
        assert_eq!(error.kind(), "too_long");
    }

    #[test]
    fn test_deserialization_enforces_limit() {
        let ok = format!("\"{}\"", "a".repeat(280));
        assert!(serde_json::from_str::<Notes>(&ok).is_ok());

        let too_long = format!("\"{}\"", "a".repeat(281));
        assert!(serde_json::from_str::<Notes>(&too_long).is_err());
    }
}
