pub mod aggregator;
pub mod client;

pub use aggregator::fetch_all_prices;
pub use client::{ExchangeClient, DEFAULT_BASE_URL};
