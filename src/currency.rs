use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum CurrencyCode {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "BRL")]
    Brl,
}

impl CurrencyCode {
    /// Decimal places of the minor unit. Both supported currencies use 2;
    /// the table stays per-currency so a 0-decimal currency slots in without
    /// touching the conversions.
    pub fn decimals(self) -> u32 {
        match self {
            CurrencyCode::Usd => 2,
            CurrencyCode::Brl => 2,
        }
    }

}

impl FromStr for CurrencyCode {
    type Err = UnsupportedCurrency;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "USD" => Ok(CurrencyCode::Usd),
            "BRL" => Ok(CurrencyCode::Brl),
            other => Err(UnsupportedCurrency(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported currency code {0}")]
pub struct UnsupportedCurrency(pub String);

/// Currency units to minor units, rounding half away from zero (`f64::round`
/// semantics): 10.50 USD becomes 1050.
pub fn to_cents(amount: f64, code: CurrencyCode) -> i64 {
    let multiplier = 10_f64.powi(code.decimals() as i32);
    (amount * multiplier).round() as i64
}

pub fn from_cents(cents: i64, code: CurrencyCode) -> f64 {
    let divisor = 10_f64.powi(code.decimals() as i32);
    cents as f64 / divisor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_codes() {
        assert_eq!("USD".parse::<CurrencyCode>(), Ok(CurrencyCode::Usd));
        assert_eq!("BRL".parse::<CurrencyCode>(), Ok(CurrencyCode::Brl));
        assert_eq!(
            "JPY".parse::<CurrencyCode>(),
            Err(UnsupportedCurrency("JPY".to_string()))
        );
    }

    #[test]
    fn converts_units_to_cents() {
        assert_eq!(to_cents(10.50, CurrencyCode::Usd), 1050);
        assert_eq!(to_cents(0.01, CurrencyCode::Brl), 1);
        assert_eq!(to_cents(99.99, CurrencyCode::Usd), 9999);
        assert_eq!(to_cents(0.0, CurrencyCode::Usd), 0);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(to_cents(1.625, CurrencyCode::Usd), 163);
        assert_eq!(to_cents(-1.625, CurrencyCode::Usd), -163);
    }

    #[test]
    fn converts_cents_back_to_units() {
        assert_eq!(from_cents(1050, CurrencyCode::Usd), 10.50);
        assert_eq!(from_cents(-33, CurrencyCode::Brl), -0.33);
        assert_eq!(from_cents(0, CurrencyCode::Usd), 0.0);
    }
}
