use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Market Data
// ---------------------------------------------------------------------------

/// Latest trade snapshot for one trading pair, as reported by the exchange.
///
/// The upstream ticker endpoint returns prices as decimal strings; they are
/// parsed into `Decimal` on the way in and rendered back as strings on the
/// way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
    pub time: DateTime<Utc>,
}

/// Per-pair row in the aggregated prices payload.
///
/// Carries either a populated price triple or an `error` message, never both.
/// Constructed only through [`PriceQuote::filled`] and
/// [`PriceQuote::unavailable`], which uphold that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub product_id: String,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub price: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub volume: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl PriceQuote {
    /// A successful quote built from an upstream ticker.
    pub fn filled(product_id: &str, ticker: Ticker) -> Self {
        Self {
            product_id: product_id.to_string(),
            price: Some(ticker.price),
            volume: Some(ticker.volume),
            time: Some(ticker.time),
            error: None,
        }
    }

    /// A failed quote carrying only the outward error message.
    pub fn unavailable(product_id: &str, message: &str) -> Self {
        Self {
            product_id: product_id.to_string(),
            price: None,
            volume: None,
            time: None,
            error: Some(message.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// A stored account row. The password hash never serializes.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Projection of an account safe to hand to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
