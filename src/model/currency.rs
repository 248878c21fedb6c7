//! Currency codes, exchange rate tables and conversion results.

use std::{collections::HashMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};

/// A currency the converter supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Cny,
    Zar,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Cny, Currency::Zar];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Cny => "CNY",
            Self::Zar => "ZAR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Cny => "¥",
            Self::Zar => "R",
        }
    }

    /// Rate against USD used when the remote rate service is unavailable.
    pub fn fallback_rate(&self) -> f64 {
        match self {
            Self::Usd => 1.0,
            Self::Cny => 7.24,
            Self::Zar => 18.12,
        }
    }

    /// Comma separated list of supported codes for error messages.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(Currency::code)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Currency {
    type Err = String;

    /// Parses a code case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or(code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Exchange rates with USD as the base currency.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRates {
    pub rates: HashMap<Currency, f64>,
    /// When the rates were fetched, or when the fallback table was adopted.
    pub updated_at: DateTime<Utc>,
}

impl ExchangeRates {
    /// The built-in fallback table stamped as fresh at `now`.
    pub fn fallback(now: DateTime<Utc>) -> Self {
        Self {
            rates: Currency::ALL
                .into_iter()
                .map(|currency| (currency, currency.fallback_rate()))
                .collect(),
            updated_at: now,
        }
    }

    /// Builds a table from a remote response keyed by currency code.
    ///
    /// USD is always 1.0; any supported code missing from `remote` uses its fallback rate.
    pub fn from_remote(remote: &HashMap<String, f64>, now: DateTime<Utc>) -> Self {
        let rates = Currency::ALL
            .into_iter()
            .map(|currency| {
                let rate = match currency {
                    Currency::Usd => 1.0,
                    other => remote
                        .get(other.code())
                        .copied()
                        .filter(|rate| rate.is_finite() && *rate > 0.0)
                        .unwrap_or_else(|| other.fallback_rate()),
                };
                (currency, rate)
            })
            .collect();

        Self {
            rates,
            updated_at: now,
        }
    }

    pub fn rate(&self, currency: Currency) -> f64 {
        self.rates
            .get(&currency)
            .copied()
            .unwrap_or_else(|| currency.fallback_rate())
    }
}

/// Result of converting an amount between two currencies.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
    pub converted: f64,
    /// Units of `to` per unit of `from`.
    pub rate: f64,
    pub rates_updated_at: DateTime<Utc>,
}
