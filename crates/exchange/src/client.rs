use async_trait::async_trait;
use coinview_core::{ExchangeError, ProductFeed, Ticker};
use std::time::Duration;

/// Coinbase Exchange public REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.exchange.coinbase.com";

/// Fixed per-request timeout. The upstream is polled fresh on every request,
/// so a hung call must not hold the response open indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// REST client for the exchange's public endpoints.
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct ExchangeClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExchangeClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ExchangeError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            // Coinbase rejects requests without a User-Agent.
            .user_agent(concat!("coinview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExchangeError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<T, ExchangeError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ExchangeError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProductFeed for ExchangeClient {
    async fn ticker(&self, product_id: &str) -> Result<Ticker, ExchangeError> {
        self.get_json(&format!("/products/{product_id}/ticker")).await
    }

    async fn products(&self) -> Result<serde_json::Value, ExchangeError> {
        self.get_json("/products").await
    }
}
