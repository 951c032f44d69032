//! Frankfurter exchange-rate API client

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use super::CurrencyProvider;
use crate::models::CurrencyOption;
use crate::{InfoHubError, Result};

const SERVICE: &str = "frankfurter";

/// `GET /latest?base=...` response
#[derive(Debug, Deserialize)]
struct LatestResponse {
    rates: HashMap<String, f64>,
}

pub struct FrankfurterClient {
    client: Client,
    base_url: String,
}

impl FrankfurterClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let start_time = Instant::now();
        debug!("Frankfurter request URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| InfoHubError::upstream(SERVICE, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InfoHubError::upstream(
                SERVICE,
                format!("{url} returned {status}"),
            ));
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|e| InfoHubError::upstream(SERVICE, format!("invalid body: {e}")))?;

        info!(
            "Frankfurter request completed in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(body)
    }
}

/// Turn the code-to-name object into options, keeping the document order
fn currency_options(table: Map<String, Value>) -> Result<Vec<CurrencyOption>> {
    table
        .into_iter()
        .map(|(code, name)| match name {
            Value::String(name) => Ok(CurrencyOption { code, name }),
            other => Err(InfoHubError::upstream(
                SERVICE,
                format!("currency {code} has non-string name {other}"),
            )),
        })
        .collect()
}

#[async_trait]
impl CurrencyProvider for FrankfurterClient {
    #[instrument(skip(self))]
    async fn currencies(&self) -> Result<Vec<CurrencyOption>> {
        let url = format!("{}/currencies", self.base_url);
        let table: Map<String, Value> = self.get_json(&url).await?;
        currency_options(table)
    }

    #[instrument(skip(self))]
    async fn latest_rates(&self, base: &str) -> Result<HashMap<String, f64>> {
        let url = format!("{}/latest?base={}", self.base_url, base);
        let latest: LatestResponse = self.get_json(&url).await?;
        Ok(latest.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_currency_options_keep_upstream_order() {
        let table = json!({
            "USD": "United States Dollar",
            "AUD": "Australian Dollar",
            "EUR": "Euro"
        });
        let Value::Object(table) = table else {
            panic!("expected object");
        };

        let options = currency_options(table).unwrap();

        let codes: Vec<&str> = options.iter().map(|o| o.code.as_str()).collect();
        assert_eq!(codes, vec!["USD", "AUD", "EUR"]);
        assert_eq!(options[1].name, "Australian Dollar");
    }

    #[test]
    fn test_currency_options_reject_non_string_names() {
        let Value::Object(table) = json!({ "USD": 1 }) else {
            panic!("expected object");
        };
        let err = currency_options(table).unwrap_err();
        assert!(matches!(err, InfoHubError::UpstreamUnavailable { .. }));
    }

    #[test]
    fn test_latest_response_parses_frankfurter_body() {
        let body = r#"{"amount":1.0,"base":"INR","date":"2025-11-04","rates":{"USD":0.01127,"EUR":0.00978}}"#;
        let latest: LatestResponse = serde_json::from_str(body).unwrap();
        assert_eq!(latest.rates.get("USD"), Some(&0.01127));
        assert_eq!(latest.rates.len(), 2);
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = FrankfurterClient::new(Client::new(), "http://localhost:9/v1/");
        assert_eq!(client.base_url, "http://localhost:9/v1");
    }
}
