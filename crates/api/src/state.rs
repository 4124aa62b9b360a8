use coinview_core::ProductFeed;
use coinview_store::AccountStore;
use std::sync::Arc;

/// Shared application state injected into every route handler.
///
/// Both collaborators are constructed at startup and handed in explicitly;
/// nothing here is a global.
pub struct AppState {
    pub store: AccountStore,
    pub feed: Arc<dyn ProductFeed>,
    /// Trading pairs shown on the dashboard, in display order.
    pub products: Vec<String>,
}

impl AppState {
    pub fn new(store: AccountStore, feed: Arc<dyn ProductFeed>, products: Vec<String>) -> Self {
        Self {
            store,
            feed,
            products,
        }
    }
}
