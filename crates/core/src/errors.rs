use thiserror::Error;

/// Errors from the upstream exchange API.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("upstream returned HTTP {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },
    #[error("malformed upstream payload: {0}")]
    Decode(String),
}

/// Errors from the account store.
///
/// `InvalidCredentials` deliberately covers both unknown-email and
/// wrong-password so a caller cannot probe which emails are registered.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User not found")]
    NotFound,
    #[error("storage failure: {0}")]
    Storage(String),
}
