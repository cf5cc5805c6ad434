// 💱 Currency Conversion
// Display-only conversion through a remote rate table. Stored amounts are
// never converted. One round-trip per call: no cache, no retry.

use crate::error::CurrencyError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Public rate service used when no override is configured
pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4";

/// Rates relative to `base`: 1 base = rates[code] code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    #[serde(default)]
    pub base: Option<String>,
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.to_uppercase()).copied()
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn latest(&self, base: &str) -> Result<RateTable, CurrencyError>;
}

// ============================================================================
// HTTP CLIENT
// ============================================================================

pub struct ExchangeRateClient {
    client: Client,
    base_url: String,
}

impl ExchangeRateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ExchangeRateClient {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn latest_url(&self, base: &str) -> String {
        format!(
            "{}/latest/{}",
            self.base_url,
            urlencoding::encode(&base.trim().to_uppercase())
        )
    }
}

impl Default for ExchangeRateClient {
    fn default() -> Self {
        Self::new(DEFAULT_RATES_URL)
    }
}

#[async_trait]
impl RateProvider for ExchangeRateClient {
    async fn latest(&self, base: &str) -> Result<RateTable, CurrencyError> {
        let url = self.latest_url(base);
        tracing::debug!(%url, "fetching exchange rates");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(CurrencyError::Status {
                status: response.status().as_u16(),
                base: base.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

// ============================================================================
// CONVERSION
// ============================================================================

/// Multiply `amount` by the rate for `to`
pub fn apply_rate(amount: f64, table: &RateTable, to: &str) -> Result<f64, CurrencyError> {
    let rate = table
        .rate(to)
        .ok_or_else(|| CurrencyError::UnsupportedCurrency(to.to_uppercase()))?;
    Ok(amount * rate)
}

/// Look up `from` rates and convert `amount` into `to`
pub async fn convert<P: RateProvider + ?Sized>(
    provider: &P,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<f64, CurrencyError> {
    let table = provider.latest(from).await?;
    let converted = apply_rate(amount, &table, to)?;
    tracing::info!(amount, from, to, converted, "converted amount");
    Ok(converted)
}
