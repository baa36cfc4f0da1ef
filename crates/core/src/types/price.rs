//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are kept at full precision; rounding to cents only happens when
/// the price is displayed.
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

    /// Create a price in US dollars, the storefront's only currency.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Create a price from an amount in the smallest currency unit.
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, 2), currency_code)
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// The amount rounded to cents, half away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for Price {
    /// Formats as e.g. `$19.99`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.rounded())
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
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
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
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::usd(Decimal::new(1299, 2)).to_string(), "$12.99");
        assert_eq!(Price::usd(Decimal::new(55, 1)).to_string(), "$5.50");
        assert_eq!(Price::usd(Decimal::ZERO).to_string(), "$0.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Price::usd(Decimal::new(1_0005, 4)).to_string(), "$1.00");
        assert_eq!(Price::usd(Decimal::new(1_005, 3)).to_string(), "$1.01");
    }

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(599, CurrencyCode::USD);
        assert_eq!(price.amount, Decimal::new(599, 2));
        assert!(!price.is_zero());
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Price::from_cents(100, CurrencyCode::GBP).to_string(), "£1.00");
        assert_eq!(CurrencyCode::EUR.code(), "EUR");
    }
}
