//! Type-safe money representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Format for display (e.g., "$19.99", "19.99 zł", "19.99 CHF").
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.amount.round_dp(2);
        match self.currency.symbol() {
            Some(Symbol::Prefix(symbol)) => format!("{symbol}{amount:.2}"),
            Some(Symbol::Suffix(symbol)) => format!("{amount:.2} {symbol}"),
            None => format!("{amount:.2} {}", self.currency.code()),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Price range of a product across its variants (gross amounts).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyRange {
    /// Cheapest variant price.
    pub start: Option<Money>,
    /// Most expensive variant price.
    pub stop: Option<Money>,
}

impl MoneyRange {
    /// Create a range from optional bounds.
    #[must_use]
    pub const fn new(start: Option<Money>, stop: Option<Money>) -> Self {
        Self { start, stop }
    }

    /// Format for display.
    ///
    /// A single price is shown when both bounds are equal or only one is
    /// known; an empty string when neither is.
    #[must_use]
    pub fn display(&self) -> String {
        match (&self.start, &self.stop) {
            (None, None) => String::new(),
            (Some(only), None) | (None, Some(only)) => only.display(),
            (Some(start), Some(stop)) if start == stop => start.display(),
            (Some(start), Some(stop)) => format!("{} - {}", start.display(), stop.display()),
        }
    }
}

/// Where a currency symbol is placed relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// `$19.99`
    Prefix(&'static str),
    /// `19.99 zł`
    Suffix(&'static str),
}

/// ISO 4217 currency codes.
///
/// Codes without a known symbol are kept verbatim in [`CurrencyCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    PLN,
    Other(String),
}

impl CurrencyCode {
    /// The display symbol, if this currency has one.
    #[must_use]
    pub const fn symbol(&self) -> Option<Symbol> {
        match self {
            Self::USD | Self::CAD | Self::AUD => Some(Symbol::Prefix("$")),
            Self::EUR => Some(Symbol::Prefix("€")),
            Self::GBP => Some(Symbol::Prefix("£")),
            Self::PLN => Some(Symbol::Suffix("zł")),
            Self::Other(_) => None,
        }
    }

    /// The three-letter code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::PLN => "PLN",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Self::USD,
            "EUR" => Self::EUR,
            "GBP" => Self::GBP,
            "CAD" => Self::CAD,
            "AUD" => Self::AUD,
            "PLN" => Self::PLN,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::from(code.as_str())
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.code().to_owned()
    }
}
