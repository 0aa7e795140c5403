//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are held in the currency's standard unit (e.g. dollars, not
/// cents). The payment collaborator speaks minor units, so conversions in
/// both directions are provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in minor units (e.g. cents for USD).
    #[must_use]
    pub fn from_minor_units(minor: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(minor, 2),
            currency_code,
        }
    }

    /// The amount in minor units, or `None` if it does not fit in an `i64`.
    #[must_use]
    pub fn minor_units(&self) -> Option<i64> {
        (self.amount * Decimal::ONE_HUNDRED).round().to_i64()
    }

    /// Multiply the price by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code,
        }
    }
}

impl fmt::Display for Price {
    /// Format for display (e.g., "$19.99").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// The currency's display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// The ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_units_display() {
        let price = Price::from_minor_units(2599, CurrencyCode::USD);
        assert_eq!(price.to_string(), "$25.99");
    }

    #[test]
    fn test_whole_amount_keeps_two_decimals() {
        let price = Price::from_minor_units(600, CurrencyCode::USD);
        assert_eq!(price.to_string(), "$6.00");
    }

    #[test]
    fn test_minor_units_roundtrip() {
        let price = Price::from_minor_units(1250, CurrencyCode::USD);
        assert_eq!(price.minor_units(), Some(1250));
    }

    #[test]
    fn test_times() {
        let price = Price::from_minor_units(850, CurrencyCode::USD);
        let tripled = price.times(3);
        assert_eq!(tripled.to_string(), "$25.50");
        assert_eq!(tripled.minor_units(), Some(2550));
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(CurrencyCode::USD.symbol(), "$");
        assert_eq!(CurrencyCode::GBP.symbol(), "\u{a3}");
        assert_eq!(CurrencyCode::USD.code(), "USD");
    }
}
