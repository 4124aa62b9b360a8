use crate::envelope::{fail, ok, store_error_response};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Health
        .route("/health", get(health_check))
        // Prices
        .route("/prices", get(get_prices))
        .route("/products", get(get_products))
        // Accounts
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/profile/{id}", get(get_profile))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

async fn health_check() -> (StatusCode, Json<Value>) {
    ok(json!({
        "message": "API is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

async fn get_prices(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let quotes = coinview_exchange::fetch_all_prices(state.feed.as_ref(), &state.products).await;
    ok(json!({
        "timestamp": Utc::now().to_rfc3339(),
        "data": quotes,
    }))
}

async fn get_products(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match state.feed.products().await {
        Ok(payload) => ok(json!({ "data": payload })),
        Err(err) => {
            tracing::error!(error = %err, "product list fetch failed");
            fail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch available products",
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Missing JSON fields default to empty strings so they hit the store's
/// presence validation (400) rather than a deserialization rejection.
#[derive(Deserialize)]
pub(crate) struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

async fn signup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Credentials>,
) -> (StatusCode, Json<Value>) {
    match state.store.signup(&body.email, &body.password).await {
        Ok(user_id) => ok(json!({
            "message": "Account created successfully",
            "userId": user_id,
        })),
        Err(err) => store_error_response(err, "Error creating account"),
    }
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Credentials>,
) -> (StatusCode, Json<Value>) {
    match state.store.login(&body.email, &body.password).await {
        Ok(user_id) => ok(json!({
            "message": "Login successful",
            "userId": user_id,
        })),
        Err(err) => store_error_response(err, "Error during login"),
    }
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let Ok(id) = id.trim().parse::<i64>() else {
        return fail(StatusCode::BAD_REQUEST, "User ID is required");
    };

    match state.store.get_profile(id).await {
        Ok(profile) => ok(json!({ "data": profile })),
        Err(err) => store_error_response(err, "Error fetching profile"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use coinview_core::{ExchangeError, ProductFeed, Ticker};
    use coinview_store::AccountStore;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    struct StubFeed {
        healthy: bool,
    }

    #[async_trait]
    impl ProductFeed for StubFeed {
        async fn ticker(&self, product_id: &str) -> Result<Ticker, ExchangeError> {
            if !self.healthy {
                return Err(ExchangeError::Transport("connection refused".into()));
            }
            let _ = product_id;
            Ok(Ticker {
                price: dec!(64250.12),
                volume: dec!(10432.5),
                time: Utc::now(),
            })
        }

        async fn products(&self) -> Result<serde_json::Value, ExchangeError> {
            if !self.healthy {
                return Err(ExchangeError::Status {
                    endpoint: "/products".into(),
                    status: 502,
                });
            }
            Ok(json!([{"id": "BTC-USD", "status": "online"}]))
        }
    }

    async fn test_state(healthy: bool) -> Arc<AppState> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = AccountStore::new(pool);
        store.run_migrations().await.unwrap();
        Arc::new(AppState::new(
            store,
            Arc::new(StubFeed { healthy }),
            vec!["BTC-USD".to_string(), "ETH-USD".to_string()],
        ))
    }

    fn credentials(email: &str, password: &str) -> Json<Credentials> {
        Json(Credentials {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    #[tokio::test]
    async fn test_health_envelope() {
        let (status, Json(body)) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "API is running");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_prices_envelope_lists_configured_pairs() {
        let state = test_state(true).await;
        let (status, Json(body)) = get_prices(State(state)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["product_id"], "BTC-USD");
        assert_eq!(data[1]["product_id"], "ETH-USD");
        assert_eq!(data[0]["price"], "64250.12");
    }

    #[tokio::test]
    async fn test_prices_degrade_per_pair_when_upstream_is_down() {
        let state = test_state(false).await;
        let (status, Json(body)) = get_prices(State(state)).await;

        // The endpoint still succeeds; each card carries its own error.
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        for quote in data {
            assert_eq!(quote["error"], "Price temporarily unavailable");
            assert!(quote.get("price").is_none());
        }
    }

    #[tokio::test]
    async fn test_products_passthrough_and_failure_envelope() {
        let (status, Json(body)) = get_products(State(test_state(true).await)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["id"], "BTC-USD");

        let (status, Json(body)) = get_products(State(test_state(false).await)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to fetch available products");
    }

    #[tokio::test]
    async fn test_signup_login_profile_flow() {
        let state = test_state(true).await;

        let (status, Json(body)) =
            signup(State(state.clone()), credentials("a@b.com", "abcdef")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Account created successfully");
        let user_id = body["userId"].as_i64().unwrap();

        let (status, Json(body)) =
            login(State(state.clone()), credentials("a@b.com", "abcdef")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"].as_i64().unwrap(), user_id);

        let (status, Json(body)) =
            get_profile(State(state), Path(user_id.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "a@b.com");
        assert!(body["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_signup_validation_and_duplicate_are_400() {
        let state = test_state(true).await;

        let (status, Json(body)) =
            signup(State(state.clone()), credentials("a@b.com", "short")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Password must be at least 6 characters long");

        signup(State(state.clone()), credentials("a@b.com", "abcdef")).await;
        let (status, Json(body)) =
            signup(State(state), credentials("a@b.com", "abcdef")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email already registered");
    }

    #[tokio::test]
    async fn test_login_failure_messages_match() {
        let state = test_state(true).await;
        signup(State(state.clone()), credentials("a@b.com", "abcdef")).await;

        let (s1, Json(b1)) =
            login(State(state.clone()), credentials("a@b.com", "wrongpass")).await;
        let (s2, Json(b2)) =
            login(State(state), credentials("nouser@b.com", "whatever")).await;

        assert_eq!(s1, StatusCode::BAD_REQUEST);
        assert_eq!(s1, s2);
        assert_eq!(b1["error"], b2["error"]);
    }

    #[tokio::test]
    async fn test_profile_errors() {
        let state = test_state(true).await;

        let (status, Json(body)) =
            get_profile(State(state.clone()), Path("abc".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User ID is required");

        let (status, Json(body)) = get_profile(State(state), Path("9999".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }
}
