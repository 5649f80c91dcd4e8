//! Amount type for monetary values in the `R$ 0,00` style the API's app uses.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles
//! parsing values that may include a currency symbol, thousands dots, and a
//! comma decimal separator.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Represents a monetary amount.
///
/// This type wraps `Decimal` and provides custom parsing and display for the
/// Brazilian-format strings the product uses: a `R$ ` prefix and a comma as the
/// decimal separator, e.g. `R$ 10,50`. Display always renders two fractional
/// digits; the sign, when negative, precedes the currency symbol.
///
/// # Examples
///
/// Parsing a formatted string:
/// ```
/// # use grana::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("R$ 10,50").unwrap();
/// assert_eq!(amount.to_string(), "R$ 10,50");
/// ```
///
/// Parsing plain input with a comma decimal:
/// ```
/// # use grana::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("-5,00").unwrap();
/// assert_eq!(amount.to_string(), "-R$ 5,00");
/// ```
///
/// Digit-mask input, where the whole string is a count of centavos:
/// ```
/// # use grana::model::Amount;
/// let amount = Amount::from_digits("1050").unwrap();
/// assert_eq!(amount.to_string(), "R$ 10,50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Interprets a digit-mask string as an integer count of centavos.
    ///
    /// This matches the "type digits right-to-left" currency input pattern:
    /// every non-digit character is dropped and the remaining digits are read
    /// as centavos, so `"1050"` becomes 10.50 and `"9"` becomes 0.09.
    pub fn from_digits(raw: &str) -> Result<Self, AmountError> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(AmountError::new(raw, None));
        }
        let cents = Decimal::from_str(&digits).map_err(|e| AmountError::new(raw, Some(e)))?;
        Ok(Self(cents / Decimal::ONE_HUNDRED))
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

/// An error that occurs when a string cannot be read as a monetary amount.
#[derive(Debug, thiserror::Error)]
#[error("invalid monetary amount '{input}'")]
pub struct AmountError {
    input: String,
    #[source]
    source: Option<rust_decimal::Error>,
}

impl AmountError {
    fn new(input: &str, source: Option<rust_decimal::Error>) -> Self {
        Self {
            input: input.to_string(),
            source,
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses display-format input back to a number.
    ///
    /// Everything except digits, the comma, and the minus sign is stripped
    /// (so `R$ `, spaces, and thousands dots all vanish), then the first comma
    /// becomes the decimal point. Accepts both plain input like `10,50` and
    /// pre-formatted `R$ 10,50` strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kept: String = s
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '-')
            .collect();
        if kept.is_empty() {
            return Err(AmountError::new(s, None));
        }
        let normalized = kept.replacen(',', ".", 1);
        let value = Decimal::from_str(&normalized).map_err(|e| AmountError::new(s, Some(e)))?;
        Ok(Self(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, abs) = if self.is_negative() {
            ("-", self.0.abs())
        } else {
            ("", self.0)
        };
        let digits = format!("{abs:.2}");
        write!(f, "{sign}R$ {}", digits.replace('.', ","))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as the display string, e.g. "R$ 10,50".
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_currency_symbol() {
        let amount = Amount::from_str("R$ 10,50").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("10.50").unwrap());
    }

    #[test]
    fn test_parse_without_currency_symbol() {
        let amount = Amount::from_str("10,50").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("10.50").unwrap());
    }

    #[test]
    fn test_parse_negative() {
        let amount = Amount::from_str("-R$ 5,00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("-5.00").unwrap());
    }

    #[test]
    fn test_parse_negative_symbol_first() {
        let amount = Amount::from_str("R$ -5,00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("-5.00").unwrap());
    }

    #[test]
    fn test_parse_with_thousands_dots() {
        let amount = Amount::from_str("R$ 1.050,75").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1050.75").unwrap());
    }

    #[test]
    fn test_parse_integer() {
        // A bare digit string has no comma, so it reads as whole units.
        let amount = Amount::from_str("1050").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1050").unwrap());
    }

    #[test]
    fn test_parse_empty_string_fails() {
        assert!(Amount::from_str("").is_err());
    }

    #[test]
    fn test_parse_no_digits_fails() {
        assert!(Amount::from_str("R$ ").is_err());
        assert!(Amount::from_str("abc").is_err());
    }

    #[test]
    fn test_parse_misplaced_minus_fails() {
        assert!(Amount::from_str("5-0").is_err());
    }

    #[test]
    fn test_from_digits() {
        let amount = Amount::from_digits("1050").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("10.50").unwrap());
    }

    #[test]
    fn test_from_digits_single_digit() {
        let amount = Amount::from_digits("9").unwrap();
        assert_eq!(amount.to_string(), "R$ 0,09");
    }

    #[test]
    fn test_from_digits_leading_zeros() {
        let amount = Amount::from_digits("050").unwrap();
        assert_eq!(amount.to_string(), "R$ 0,50");
    }

    #[test]
    fn test_from_digits_strips_noise() {
        // Non-digits (including a minus) are dropped before reading centavos.
        let amount = Amount::from_digits("-1a0b5c0").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("10.50").unwrap());
    }

    #[test]
    fn test_from_digits_empty_fails() {
        assert!(Amount::from_digits("").is_err());
        assert!(Amount::from_digits("abc").is_err());
    }

    #[test]
    fn test_digit_mask_round_trip() {
        // Parsing the display of a digit-mask amount recovers cents / 100.
        let displayed = Amount::from_digits("1050").unwrap().to_string();
        let parsed = Amount::from_str(&displayed).unwrap();
        assert_eq!(parsed.value(), Decimal::from_str("10.50").unwrap());
    }

    #[test]
    fn test_display_positive() {
        let amount = Amount::new(Decimal::from_str("50.00").unwrap());
        assert_eq!(amount.to_string(), "R$ 50,00");
    }

    #[test]
    fn test_display_negative() {
        let amount = Amount::new(Decimal::from_str("-766.41").unwrap());
        assert_eq!(amount.to_string(), "-R$ 766,41");
    }

    #[test]
    fn test_display_zero() {
        let amount = Amount::new(Decimal::ZERO);
        assert_eq!(amount.to_string(), "R$ 0,00");
    }

    #[test]
    fn test_display_pads_fraction() {
        let amount = Amount::new(Decimal::from_str("10.5").unwrap());
        assert_eq!(amount.to_string(), "R$ 10,50");
    }

    #[test]
    fn test_serialize() {
        let amount = Amount::new(Decimal::from_str("10.50").unwrap());
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"R$ 10,50\"");
    }

    #[test]
    fn test_deserialize() {
        let amount: Amount = serde_json::from_str("\"R$ 10,50\"").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("10.50").unwrap());

        let plain: Amount = serde_json::from_str("\"10,50\"").unwrap();
        assert_eq!(plain.value(), Decimal::from_str("10.50").unwrap());
    }

    #[test]
    fn test_ordering() {
        let a = Amount::from_str("30,00").unwrap();
        let b = Amount::from_str("50,00").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_zero_is_not_negative() {
        let zero = Amount::new(Decimal::ZERO);
        assert!(zero.is_zero());
        assert!(!zero.is_negative());
    }
}
