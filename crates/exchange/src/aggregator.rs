use coinview_core::{PriceQuote, ProductFeed};
use futures_util::future::join_all;

/// Outward message for a pair whose fetch failed. The upstream error detail
/// stays in the log; clients only ever see this string.
pub const UNAVAILABLE_MESSAGE: &str = "Price temporarily unavailable";

/// Fetch the latest ticker for every configured trading pair concurrently.
///
/// Fan-out/join-all: each pair is fetched independently, all fetches settle
/// before this returns, and one pair's failure never cancels or delays its
/// siblings. The result has exactly one quote per input id, in input order.
pub async fn fetch_all_prices(feed: &dyn ProductFeed, product_ids: &[String]) -> Vec<PriceQuote> {
    let fetches = product_ids.iter().map(|product_id| async move {
        match feed.ticker(product_id).await {
            Ok(ticker) => PriceQuote::filled(product_id, ticker),
            Err(err) => {
                tracing::error!(product_id = %product_id, error = %err, "ticker fetch failed");
                PriceQuote::unavailable(product_id, UNAVAILABLE_MESSAGE)
            }
        }
    });

    join_all(fetches).await
}
