use crate::errors::ExchangeError;
use crate::models::Ticker;
use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Product Feed Trait
// ---------------------------------------------------------------------------

/// Read-only view of an exchange's public market data.
///
/// The live implementation talks to the Coinbase Exchange REST API; tests
/// substitute stubs to exercise the aggregation path without the network.
#[async_trait]
pub trait ProductFeed: Send + Sync {
    /// Latest ticker for one trading pair.
    async fn ticker(&self, product_id: &str) -> Result<Ticker, ExchangeError>;

    /// The upstream product catalogue, passed through verbatim.
    async fn products(&self) -> Result<serde_json::Value, ExchangeError>;
}
