//! Currency conversion with cached exchange rates.
//!
//! Rates are fetched from a remote USD-based rate service at most once per day and kept
//! in a single in-memory entry. When the service is unreachable the built-in fallback
//! table is adopted and stamped as fresh, so a failing service is retried at most daily.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::{
    error::{command::CommandError, AppError},
    model::currency::{Conversion, Currency, ExchangeRates},
};

/// How long fetched rates are served before refreshing.
const RATE_CACHE_TTL_HOURS: i64 = 24;

/// Source of USD-based exchange rates keyed by currency code.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self) -> Result<HashMap<String, f64>, AppError>;
}

#[derive(Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

/// Fetches rates over HTTP from an exchangerate-api compatible endpoint.
pub struct HttpRateSource {
    client: reqwest::Client,
    url: String,
}

impl HttpRateSource {
    /// # Arguments
    /// - `client` - Shared HTTP client, configured with the request timeout
    /// - `url` - Endpoint returning `{ "rates": { "CODE": rate, ... } }`
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch(&self) -> Result<HashMap<String, f64>, AppError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;

        let body: RatesResponse = response.json().await?;

        Ok(body.rates)
    }
}

/// Single-entry cache in front of a `RateSource`.
pub struct RateCache {
    source: Arc<dyn RateSource>,
    entry: RwLock<Option<ExchangeRates>>,
}

impl RateCache {
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        Self {
            source,
            entry: RwLock::new(None),
        }
    }

    /// Returns the cached rates, refreshing them when missing or older than a day.
    ///
    /// Never fails: a failed refresh installs the fallback table.
    pub async fn get_rates(&self, now: DateTime<Utc>) -> ExchangeRates {
        if let Some(rates) = self.entry.read().await.as_ref() {
            if !is_stale(rates, now) {
                return rates.clone();
            }
        }

        let mut entry = self.entry.write().await;

        // Another task may have refreshed while we waited for the lock
        if let Some(rates) = entry.as_ref() {
            if !is_stale(rates, now) {
                return rates.clone();
            }
        }

        tracing::info!("Exchange rates cache is stale, fetching new rates");

        let rates = match self.source.fetch().await {
            Ok(remote) => {
                let rates = ExchangeRates::from_remote(&remote, now);
                tracing::info!("Exchange rates updated: {:?}", rates.rates);
                rates
            }
            Err(e) => {
                tracing::warn!("Failed to fetch exchange rates, using fallback: {}", e);
                ExchangeRates::fallback(now)
            }
        };

        *entry = Some(rates.clone());
        rates
    }
}

fn is_stale(rates: &ExchangeRates, now: DateTime<Utc>) -> bool {
    rates.rates.is_empty() || now - rates.updated_at > TimeDelta::hours(RATE_CACHE_TTL_HOURS)
}

/// Validated `/convert` input.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
}

impl ConversionRequest {
    /// Validates raw `/convert` arguments in the order the user sees them reported:
    /// source currency, target currency, distinct currencies, then the amount.
    pub fn parse(amount: &str, from: &str, to: &str) -> Result<Self, CommandError> {
        let from: Currency = from
            .parse()
            .map_err(CommandError::UnsupportedSourceCurrency)?;
        let to: Currency = to
            .parse()
            .map_err(CommandError::UnsupportedTargetCurrency)?;

        if from == to {
            return Err(CommandError::SameCurrency);
        }

        Ok(Self {
            amount: parse_amount(amount)?,
            from,
            to,
        })
    }
}

/// Parses a positive amount, ignoring thousands separators.
pub fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    let amount: f64 = raw
        .trim()
        .replace(',', "")
        .parse()
        .map_err(|_| CommandError::InvalidAmount(raw.to_string()))?;

    if !amount.is_finite() {
        return Err(CommandError::InvalidAmount(raw.to_string()));
    }
    if amount <= 0.0 {
        return Err(CommandError::NonPositiveAmount);
    }

    Ok(amount)
}

/// Converts through USD: `amount / rate(from) * rate(to)`.
///
/// # Returns
/// - `Ok(Conversion)` - Converted amount and effective rate
/// - `Err(CommandError::AmountTooLarge)` - The result does not fit in a finite number
pub fn convert(
    request: &ConversionRequest,
    rates: &ExchangeRates,
) -> Result<Conversion, CommandError> {
    let from_rate = rates.rate(request.from);
    let to_rate = rates.rate(request.to);
    let converted = request.amount / from_rate * to_rate;

    if !converted.is_finite() {
        return Err(CommandError::AmountTooLarge);
    }

    Ok(Conversion {
        amount: request.amount,
        from: request.from,
        to: request.to,
        converted,
        rate: to_rate / from_rate,
        rates_updated_at: rates.updated_at,
    })
}

/// Formats an amount with two decimals and thousands separators, e.g. `1,234.50`.
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// Formats an amount with its currency symbol and code, e.g. `¥724.00 CNY`.
pub fn format_money(amount: f64, currency: Currency) -> String {
    format!(
        "{}{} {}",
        currency.symbol(),
        format_amount(amount),
        currency.code()
    )
}

/// Supported codes containing `current`, case-insensitively, for autocomplete.
pub fn autocomplete_currencies(current: &str) -> Vec<&'static str> {
    let needle = current.trim().to_uppercase();

    Currency::ALL
        .iter()
        .map(Currency::code)
        .filter(|code| code.contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct StaticRates {
        rates: HashMap<String, f64>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RateSource for StaticRates {
        async fn fetch(&self) -> Result<HashMap<String, f64>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.rates.clone())
        }
    }

    struct FailingRates;

    #[async_trait]
    impl RateSource for FailingRates {
        async fn fetch(&self) -> Result<HashMap<String, f64>, AppError> {
            Err(AppError::IoErr(std::io::Error::other("unreachable")))
        }
    }

    fn static_source(pairs: &[(&str, f64)]) -> Arc<StaticRates> {
        Arc::new(StaticRates {
            rates: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            calls: AtomicUsize::new(0),
        })
    }

    #[test]
    fn converts_through_usd() {
        let rates = ExchangeRates::fallback(Utc::now());
        let request = ConversionRequest::parse("100", "usd", " CNY ").unwrap();

        let conversion = convert(&request, &rates).unwrap();

        assert_eq!(format_money(conversion.converted, Currency::Cny), "¥724.00 CNY");
        assert_eq!(format!("{:.4}", conversion.rate), "7.2400");
    }

    #[test]
    fn converting_back_returns_original_amount() {
        let rates = ExchangeRates::fallback(Utc::now());
        let there = convert(
            &ConversionRequest::parse("250", "ZAR", "CNY").unwrap(),
            &rates,
        )
        .unwrap();
        let back = convert(
            &ConversionRequest {
                amount: there.converted,
                from: Currency::Cny,
                to: Currency::Zar,
            },
            &rates,
        )
        .unwrap();

        assert!((back.converted - 250.0).abs() < 1e-9);
    }

    #[test]
    fn validation_errors_in_reported_order() {
        assert_eq!(
            ConversionRequest::parse("x", "EUR", "GBP"),
            Err(CommandError::UnsupportedSourceCurrency("EUR".to_string()))
        );
        assert_eq!(
            ConversionRequest::parse("x", "USD", "GBP"),
            Err(CommandError::UnsupportedTargetCurrency("GBP".to_string()))
        );
        assert_eq!(
            ConversionRequest::parse("x", "USD", "usd"),
            Err(CommandError::SameCurrency)
        );
        assert_eq!(
            ConversionRequest::parse("abc", "USD", "ZAR"),
            Err(CommandError::InvalidAmount("abc".to_string()))
        );
        assert_eq!(
            ConversionRequest::parse("0", "USD", "ZAR"),
            Err(CommandError::NonPositiveAmount)
        );
    }

    #[test]
    fn overflowing_conversion_is_rejected() {
        let rates = ExchangeRates::fallback(Utc::now());
        let request = ConversionRequest::parse("1e308", "USD", "ZAR").unwrap();

        assert_eq!(convert(&request, &rates), Err(CommandError::AmountTooLarge));
    }

    #[test]
    fn amounts_accept_thousands_separators() {
        assert_eq!(parse_amount("1,234.5"), Ok(1234.5));
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn formats_grouped_amounts() {
        assert_eq!(format_amount(0.5), "0.50");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_money(100.0, Currency::Usd), "$100.00 USD");
    }

    #[test]
    fn autocomplete_filters_by_substring() {
        assert_eq!(autocomplete_currencies("a"), vec!["ZAR"]);
        assert_eq!(autocomplete_currencies(""), vec!["USD", "CNY", "ZAR"]);
        assert!(autocomplete_currencies("eur").is_empty());
    }

    #[tokio::test]
    async fn fresh_rates_are_served_from_cache() {
        let source = static_source(&[("CNY", 7.0), ("ZAR", 18.0)]);
        let cache = RateCache::new(source.clone());
        let now = Utc::now();

        let first = cache.get_rates(now).await;
        let second = cache.get_rates(now + TimeDelta::hours(23)).await;

        assert_eq!(first, second);
        assert_eq!(first.rate(Currency::Cny), 7.0);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stale_rates_are_refreshed() {
        let source = static_source(&[("CNY", 7.0)]);
        let cache = RateCache::new(source.clone());
        let now = Utc::now();

        cache.get_rates(now).await;
        let refreshed = cache.get_rates(now + TimeDelta::hours(25)).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(refreshed.updated_at, now + TimeDelta::hours(25));
        // Missing from the response, so the fallback rate applies
        assert_eq!(refreshed.rate(Currency::Zar), 18.12);
    }

    #[tokio::test]
    async fn failed_fetch_installs_fallback() {
        let cache = RateCache::new(Arc::new(FailingRates));
        let now = Utc::now();

        let rates = cache.get_rates(now).await;

        assert_eq!(rates, ExchangeRates::fallback(now));
    }
}
