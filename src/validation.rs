//! Validation errors and record validation.
//!
//! Field types such as [`Money`](crate::fields::Money) or
//! [`PhoneNumber`](crate::fields::PhoneNumber) validate themselves when they
//! are constructed or deserialized, so an invalid value of those types cannot
//! exist. Records add the constraints that only make sense in context (a
//! manifest quantity of at least one, a non-empty manifest) through
//! `#[derive(Validate)]` from the `validator` crate. Its error tree converts
//! into a single [`ValidationError`] carrying the full field path.
//!
//! # Example
//!
//! ```rust
//! use uberdirect::validation::ValidationError;
//!
//! let error = ValidationError::new("too_long", "must be at most 280 characters")
//!     .at("pickup_notes");
//! assert_eq!(error.field(), "pickup_notes");
//! assert_eq!(error.kind(), "too_long");
//! ```

use std::borrow::Cow;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::fields::Money;

pub use validator::Validate;

/// Key `validator` uses for errors raised by struct-level checks.
const STRUCT_LEVEL_KEY: &str = "__all__";

/// A field-level or cross-field constraint violation.
///
/// `kind` names the constraint that failed. For time-window and courier
/// ordering rules it is the name of the field the rule relates to, for
/// example `pickup_ready_dt` when a pickup deadline is too close to the
/// ready time.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}", describe(.field, .kind, .message))]
pub struct ValidationError {
    field: String,
    kind: String,
    message: String,
}

fn describe(field: &str, kind: &str, message: &str) -> String {
    if field.is_empty() {
        format!("{message} [{kind}]")
    } else {
        format!("{field}: {message} [{kind}]")
    }
}

impl ValidationError {
    /// Creates an error that is not yet attached to a field.
    #[must_use]
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: String::new(),
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Creates an error attached to `field`.
    #[must_use]
    pub fn for_field(
        field: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Prefixes the field path with `parent`. An empty parent is a no-op.
    ///
    /// `error.at("dimensions").at("manifest_items[0]")` yields
    /// `manifest_items[0].dimensions.<field>`.
    #[must_use]
    pub fn at(mut self, parent: impl AsRef<str>) -> Self {
        let parent = parent.as_ref();
        if parent.is_empty() {
            return self;
        }
        self.field = if self.field.is_empty() {
            parent.to_string()
        } else if self.field.starts_with('[') {
            format!("{parent}{}", self.field)
        } else {
            format!("{parent}.{}", self.field)
        };
        self
    }

    /// Returns the dotted path of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the name of the violated constraint.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Wraps the error for a serde deserializer.
    ///
    /// serde keeps only the text of a custom error, so the error is encoded
    /// as JSON and [`from_value`] decodes it back.
    pub(crate) fn into_de_error<E: de::Error>(self) -> E {
        match serde_json::to_string(&self) {
            Ok(encoded) => E::custom(encoded),
            Err(_) => E::custom(self),
        }
    }

    pub(crate) fn from_de_error(error: &serde_json::Error) -> Self {
        let text = error.to_string();
        serde_json::from_str(&text).unwrap_or_else(|_| Self::new("invalid_input", text))
    }
}

/// Deserializes the raw shape `R` and converts it into `T`, keeping the
/// structured [`ValidationError`] for [`from_value`].
pub(crate) fn deserialize_validated<'de, D, R, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    R: Deserialize<'de>,
    T: TryFrom<R, Error = ValidationError>,
{
    let raw = R::deserialize(deserializer)?;
    T::try_from(raw).map_err(ValidationError::into_de_error)
}

// ============================================================================
// Conversion From validator
// ============================================================================

/// Picks the violation with the lowest field path, so the result does not
/// depend on hash map order.
impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut found = Vec::new();
        collect("", &errors, &mut found);
        found
            .into_iter()
            .min_by(|a, b| a.field.cmp(&b.field))
            .unwrap_or_else(|| Self::new("invalid_input", "validation failed"))
    }
}

fn collect(path: &str, errors: &ValidationErrors, found: &mut Vec<ValidationError>) {
    for (&key, kind) in errors.errors() {
        let path = if key == STRUCT_LEVEL_KEY {
            path.to_string()
        } else if path.is_empty() {
            key.to_string()
        } else {
            format!("{path}.{key}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                found.extend(list.iter().map(|error| {
                    let message = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.to_string(), ToString::to_string);
                    ValidationError::for_field(path.clone(), error.code.to_string(), message)
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect(&path, inner, found),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(&format!("{path}[{index}]"), inner, found);
                }
            }
        }
    }
}

// ============================================================================
// Custom Rules
// ============================================================================

/// Rejects negative amounts with kind `greater_than_equal`.
///
/// # Errors
///
/// Returns a `validator` error when `value` is below zero.
pub fn non_negative(value: &Money) -> Result<(), validator::ValidationError> {
    if value.is_negative() {
        let mut error = validator::ValidationError::new("greater_than_equal");
        error.message = Some(Cow::Borrowed("must be greater than or equal to 0"));
        return Err(error);
    }
    Ok(())
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses and validates a record from raw JSON.
///
/// Field-type errors keep their kind and gain the path of the field they
/// were read from. Shape errors surface with kind `invalid_input`. Record
/// constraints surface as reported by [`Validate`].
///
/// # Errors
///
/// Returns a [`ValidationError`] if the JSON does not fit `T` or if `T`
/// violates one of its constraints.
pub fn from_value<T>(value: serde_json::Value) -> Result<T, ValidationError>
where
    T: DeserializeOwned + Validate,
{
    let record: T = serde_path_to_error::deserialize(value).map_err(|error| {
        let path = field_path(error.path());
        ValidationError::from_de_error(error.inner()).at(path)
    })?;
    record.validate()?;
    Ok(record)
}

fn field_path(path: &serde_path_to_error::Path) -> String {
    let mut rendered = String::new();
    for segment in path.iter() {
        match segment {
            serde_path_to_error::Segment::Seq { index } => {
                rendered.push_str(&format!("[{index}]"));
            }
            serde_path_to_error::Segment::Map { key } => {
                if !rendered.is_empty() {
                    rendered.push('.');
                }
                rendered.push_str(key);
            }
            _ => {}
        }
    }
    rendered
}
