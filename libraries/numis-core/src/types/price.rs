/// Price domain types
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NumisError;

/// Currency a price is expressed in
///
/// The set is closed: a price row can only carry one of these codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    /// Argentine peso
    #[default]
    Ars,
    /// United States dollar
    Usd,
    /// Euro
    Eur,
}

impl CurrencyCode {
    /// All supported currencies, in display order
    pub const ALL: [CurrencyCode; 3] = [CurrencyCode::Ars, CurrencyCode::Usd, CurrencyCode::Eur];

    /// ISO 4217 code
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Ars => "ARS",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
        }
    }

    /// Symbol printed before an amount
    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Ars => "$",
            CurrencyCode::Usd => "US$",
            CurrencyCode::Eur => "€",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = NumisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ARS" => Ok(CurrencyCode::Ars),
            "USD" => Ok(CurrencyCode::Usd),
            "EUR" => Ok(CurrencyCode::Eur),
            other => Err(NumisError::invalid_input(format!(
                "Unknown currency code: {other}"
            ))),
        }
    }
}

/// A persisted price entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Positive amount
    pub amount: f64,
    /// Currency of the amount
    pub currency: CurrencyCode,
}

impl Price {
    /// Create a new price
    pub fn new(amount: f64, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Prices are only meaningful when strictly positive
    pub fn is_valid(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0
    }
}
