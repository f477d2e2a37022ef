//! Structured addresses sent as canonical JSON strings.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validation::{deserialize_validated, ValidationError};

/// Address parts, declared in lexicographic key order so that serializing
/// them produces sorted keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
struct AddressParts {
    city: String,
    country: String,
    state: String,
    street_address: Vec<String>,
    zip_code: String,
}

/// Raw input shapes accepted for a structured address.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum AddressInput {
    /// A pre-serialized JSON object.
    Serialized(String),
    /// The object itself.
    Structured {
        /// One or two street lines.
        street_address: Vec<String>,
        /// City.
        city: String,
        /// State or province.
        state: String,
        /// Postal code.
        zip_code: String,
        /// Country code.
        country: String,
    },
}

/// A postal address that the API expects as a JSON-encoded string.
///
/// Accepts either the object or its JSON string form and always serializes
/// to compact JSON with sorted keys, so two addresses with the same parts
/// produce byte-identical output.
///
/// # Example
///
/// ```rust
/// use uberdirect::fields::StructuredAddress;
///
/// let address = StructuredAddress::new(["Street 1"], "CDMX", "VZ", "99999", "MX").unwrap();
/// assert_eq!(
///     address.to_json_string(),
///     r#"{"city":"CDMX","country":"MX","state":"VZ","street_address":["Street 1"],"zip_code":"99999"}"#
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructuredAddress(AddressParts);

impl StructuredAddress {
    /// Creates an address from its parts.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] with kind `street_address` unless there
    /// are one or two street lines.
    pub fn new<I, S>(
        street_address: I,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let street_address: Vec<String> = street_address.into_iter().map(Into::into).collect();
        if street_address.is_empty() || street_address.len() > 2 {
            return Err(ValidationError::for_field(
                "street_address",
                "street_address",
                format!(
                    "must contain one or two lines, got {}",
                    street_address.len()
                ),
            ));
        }

        Ok(Self(AddressParts {
            city: city.into(),
            country: country.into(),
            state: state.into(),
            street_address,
            zip_code: zip_code.into(),
        }))
    }

    /// Parses any accepted input shape.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if a serialized address is not a JSON
    /// object with the expected keys, or if the street lines are invalid.
    pub fn parse(input: AddressInput) -> Result<Self, ValidationError> {
        match input {
            AddressInput::Serialized(text) => {
                let parts: AddressParts = serde_json::from_str(&text)
                    .map_err(|e| ValidationError::new("json_invalid", e.to_string()))?;
                Self::new(
                    parts.street_address,
                    parts.city,
                    parts.state,
                    parts.zip_code,
                    parts.country,
                )
            }
            AddressInput::Structured {
                street_address,
                city,
                state,
                zip_code,
                country,
            } => Self::new(street_address, city, state, zip_code, country),
        }
    }

    /// Returns the street lines.
    #[must_use]
    pub fn street_address(&self) -> &[String] {
        &self.0.street_address
    }

    /// Returns the city.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.0.city
    }

    /// Returns the state.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.0.state
    }

    /// Returns the postal code.
    #[must_use]
    pub fn zip_code(&self) -> &str {
        &self.0.zip_code
    }

    /// Returns the country.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.0.country
    }

    /// Returns the canonical wire form: compact JSON with sorted keys and
    /// non-ASCII characters escaped as `\uXXXX`.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        // A struct of strings always serializes
        escape_non_ascii(&serde_json::to_string(&self.0).unwrap_or_default())
    }
}

/// Escapes every non-ASCII character as lowercase `\uXXXX`, using a
/// surrogate pair above U+FFFF.
fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                escaped.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    escaped
}

impl TryFrom<AddressInput> for StructuredAddress {
    type Error = ValidationError;

    fn try_from(input: AddressInput) -> Result<Self, Self::Error> {
        Self::parse(input)
    }
}

impl std::str::FromStr for StructuredAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(AddressInput::Serialized(s.to_string()))
    }
}

impl fmt::Display for StructuredAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

impl<'de> Deserialize<'de> for StructuredAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_validated::<D, AddressInput, Self>(deserializer)
    }
}

impl Serialize for StructuredAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_json_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CANONICAL: &str = r#"{"city":"CDMX","country":"MX","state":"VZ","street_address":["Street 1"],"zip_code":"99999"}"#;

    #[derive(Debug, Deserialize, Serialize)]
    struct Wrapper {
        address: StructuredAddress,
    }

    fn address_object() -> serde_json::Value {
        json!({
            "street_address": ["Street 1"],
            "city": "CDMX",
            "state": "VZ",
            "country": "MX",
            "zip_code": "99999"
        })
    }

    #[test]
    fn test_object_and_string_inputs_are_equal() {
        let from_object: Wrapper =
            serde_json::from_value(json!({"address": address_object()})).unwrap();
        let from_canonical: Wrapper =
            serde_json::from_value(json!({"address": CANONICAL})).unwrap();
        let from_pretty: Wrapper = serde_json::from_value(
            json!({"address": serde_json::to_string_pretty(&address_object()).unwrap()}),
        )
        .unwrap();
        let built = StructuredAddress::new(["Street 1"], "CDMX", "VZ", "99999", "MX").unwrap();

        assert_eq!(from_object.address, from_canonical.address);
        assert_eq!(from_canonical.address, from_pretty.address);
        assert_eq!(from_pretty.address, built);
    }

    #[test]
    fn test_serializes_as_canonical_string() {
        let wrapper: Wrapper =
            serde_json::from_value(json!({"address": address_object()})).unwrap();
        let output = serde_json::to_value(&wrapper).unwrap();
        assert_eq!(output["address"], CANONICAL);
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let address = StructuredAddress::new(["Calle 5"], "México", "CDMX", "06600", "MX").unwrap();
        let output = address.to_json_string();
        assert!(output.contains(r#""city":"M\u00e9xico""#));
        assert!(output.is_ascii());

        let emoji = StructuredAddress::new(["Calle 🌮"], "CDMX", "CDMX", "06600", "MX").unwrap();
        assert!(emoji.to_json_string().contains(r"Calle \ud83c\udf2e"));

        let parsed: StructuredAddress = output.parse().unwrap();
        assert_eq!(parsed, address);
    }

    #[test]
    fn test_two_street_lines_allowed_three_rejected() {
        assert!(StructuredAddress::new(["a", "b"], "c", "s", "z", "MX").is_ok());

        let error = StructuredAddress::new(["a", "b", "c"], "c", "s", "z", "MX").unwrap_err();
        assert_eq!(error.kind(), "street_address");

        let empty: [&str; 0] = [];
        assert!(StructuredAddress::new(empty, "c", "s", "z", "MX").is_err());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut object = address_object();
        object["district"] = json!("Centro");
        let wrapper: Wrapper = serde_json::from_value(json!({"address": object})).unwrap();
        assert_eq!(wrapper.address.to_json_string(), CANONICAL);
    }

    #[test]
    fn test_malformed_string_is_rejected() {
        assert!("not json".parse::<StructuredAddress>().is_err());
        assert!(serde_json::from_value::<Wrapper>(json!({"address": "{\"city\":1}"})).is_err());
    }
}
