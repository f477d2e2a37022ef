//! Fixed-point money encoded on the wire as an integer count of cents.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validation::ValidationError;

/// A monetary amount with exactly two fractional digits.
///
/// On the wire every amount is an integer count of the smallest currency
/// unit: `$10.99` travels as `1099`. On input, JSON integers are read as that
/// count while JSON floats and strings are read as decimal amounts with at
/// most two fractional digits.
///
/// Percentages that the API encodes the same way (`vat_percentage`,
/// `tax_percentage`) use this type too.
///
/// # Example
///
/// ```rust
/// use rust_decimal::Decimal;
/// use uberdirect::fields::Money;
///
/// let price = Money::from_cents(1099);
/// assert_eq!(price.amount(), Decimal::new(1099, 2));
/// assert_eq!(serde_json::to_value(price).unwrap(), 1099);
///
/// let parsed: Money = serde_json::from_value(serde_json::json!("10.99")).unwrap();
/// assert_eq!(parsed, price);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    /// Zero in any currency.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates an amount from a count of the smallest currency unit.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Creates an amount from a decimal value.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] with kind `decimal_places` if the value
    /// has more than two significant fractional digits, or `out_of_range` if
    /// its cent count does not fit an `i64`.
    pub fn new(amount: Decimal) -> Result<Self, ValidationError> {
        if amount.normalize().scale() > 2 {
            return Err(ValidationError::new(
                "decimal_places",
                format!("{amount} has more than 2 decimal places"),
            ));
        }

        let mut scaled = amount;
        scaled.rescale(2);
        if i64::try_from(scaled.mantissa()).is_err() {
            return Err(ValidationError::new(
                "out_of_range",
                format!("{amount} does not fit in a cent count"),
            ));
        }

        Ok(Self(scaled))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount as a count of the smallest currency unit.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // bounded by construction
    pub fn cents(&self) -> i64 {
        self.0.mantissa() as i64
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| ValidationError::new("decimal_parsing", e.to_string()))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = ValidationError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.cents())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer cent count or a decimal amount with at most 2 decimal places")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money::from_cents(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        let cents = i64::try_from(v).map_err(|_| {
            ValidationError::new("out_of_range", "cent count out of range").into_de_error::<E>()
        })?;
        Ok(Money::from_cents(cents))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        let amount = Decimal::from_f64(v)
            .ok_or_else(|| {
                ValidationError::new("decimal_parsing", format!("{v} is not a finite decimal amount"))
                    .into_de_error::<E>()
            })?;
        Money::new(amount).map_err(ValidationError::into_de_error)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(ValidationError::into_de_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_input_is_cents() {
        let money: Money = serde_json::from_value(json!(9999)).unwrap();
        assert_eq!(money.amount(), Decimal::from_str("99.99").unwrap());
        assert_eq!(serde_json::to_value(money).unwrap(), json!(9999));
    }

    #[test]
    fn test_decimal_inputs_are_amounts() {
        let from_float: Money = serde_json::from_value(json!(99.99)).unwrap();
        let from_string: Money = serde_json::from_value(json!("99.99")).unwrap();
        let from_int: Money = serde_json::from_value(json!(9999)).unwrap();

        assert_eq!(from_float, from_int);
        assert_eq!(from_string, from_int);
        assert_eq!(serde_json::to_value(from_float).unwrap(), json!(9999));
    }

    #[test]
    fn test_rejects_more_than_two_decimal_places() {
        let error = Money::from_str("1.005").unwrap_err();
        assert_eq!(error.kind(), "decimal_places");

        let result: Result<Money, _> = serde_json::from_value(json!("0.001"));
        assert!(result.is_err());
    }

    #[test]
    fn test_trailing_zeros_are_not_significant() {
        let money = Money::from_str("12.5000").unwrap();
        assert_eq!(money.cents(), 1250);
    }

    #[test]
    fn test_integer_round_trip() {
        for cents in 0..=1_000_000 {
            assert_eq!(Money::from_cents(cents).cents(), cents);
        }
        for cents in (0..=1_000_000).step_by(997).chain([1_000_000]) {
            let money: Money = serde_json::from_value(json!(cents)).unwrap();
            assert_eq!(serde_json::to_value(money).unwrap(), json!(cents));
        }
    }

    #[test]
    fn test_decimal_round_trip() {
        for text in ["0", "0.01", "0.1", "1", "10.99", "99.9", "123456.78"] {
            let amount = Decimal::from_str(text).unwrap();
            let encoded = serde_json::to_value(Money::new(amount).unwrap()).unwrap();
            let decoded: Money = serde_json::from_value(encoded).unwrap();
            assert_eq!(decoded.amount(), amount);
        }
    }

    #[test]
    fn test_negative_detection() {
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::ZERO.is_negative());
        assert!(!Money::from_cents(1).is_negative());
    }

    #[test]
    fn test_rejects_non_numeric_input() {
        assert!(serde_json::from_value::<Money>(json!("ten")).is_err());
        assert!(serde_json::from_value::<Money>(json!(true)).is_err());
    }
}
