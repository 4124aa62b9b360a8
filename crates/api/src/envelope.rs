//! The uniform `{success, ...}` JSON envelope.
//!
//! Every response, success or failure, goes through these helpers; no error
//! propagates uncaught past a handler.

use axum::http::StatusCode;
use axum::Json;
use coinview_core::StoreError;
use serde_json::{json, Value};

pub fn ok(body: Value) -> (StatusCode, Json<Value>) {
    let mut envelope = json!({"success": true});
    if let (Some(envelope), Some(body)) = (envelope.as_object_mut(), body.as_object()) {
        for (key, value) in body {
            envelope.insert(key.clone(), value.clone());
        }
    }
    (StatusCode::OK, Json(envelope))
}

pub fn fail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({"success": false, "error": message})))
}

/// Map a store error to its outward status and message.
///
/// `storage_message` is the endpoint's generic 500 text; the real failure
/// detail is logged here and never sent to the client.
pub fn store_error_response(err: StoreError, storage_message: &str) -> (StatusCode, Json<Value>) {
    match err {
        StoreError::Validation(message) => fail(StatusCode::BAD_REQUEST, &message),
        StoreError::DuplicateEmail => fail(StatusCode::BAD_REQUEST, "Email already registered"),
        StoreError::InvalidCredentials => fail(StatusCode::BAD_REQUEST, "Invalid credentials"),
        StoreError::NotFound => fail(StatusCode::NOT_FOUND, "User not found"),
        StoreError::Storage(detail) => {
            tracing::error!(error = %detail, "storage failure");
            fail(StatusCode::INTERNAL_SERVER_ERROR, storage_message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_merges_payload_under_success_flag() {
        let (status, Json(body)) = ok(json!({"userId": 7, "message": "Login successful"}));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["userId"], 7);
        assert_eq!(body["message"], "Login successful");
    }

    #[test]
    fn test_fail_shape() {
        let (status, Json(body)) = fail(StatusCode::BAD_REQUEST, "Invalid credentials");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid credentials");
    }

    #[test]
    fn test_store_error_statuses() {
        let cases = [
            (
                StoreError::Validation("Email and password are required".into()),
                StatusCode::BAD_REQUEST,
            ),
            (StoreError::DuplicateEmail, StatusCode::BAD_REQUEST),
            (StoreError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (StoreError::NotFound, StatusCode::NOT_FOUND),
            (
                StoreError::Storage("disk full".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let (status, _) = store_error_response(err, "Error creating account");
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_storage_detail_never_reaches_client() {
        let (_, Json(body)) =
            store_error_response(StoreError::Storage("disk full".into()), "Error during login");
        assert_eq!(body["error"], "Error during login");
    }
}
