//! Account storage over a single `accounts` table.
//!
//! The store owns the connection pool and is constructed explicitly at
//! startup, then injected into request handlers. Schema setup is an embedded
//! sqlx migration run before the server starts accepting connections.

use chrono::{DateTime, Utc};
use coinview_core::{Account, AccountProfile, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

/// Matches the original deployment's bcrypt work factor.
const BCRYPT_COST: u32 = 10;
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone)]
pub struct AccountStore {
    pool: SqlitePool,
}

impl AccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating the database file if needed) and pool a SQLite database.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::Storage(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        Ok(Self::new(pool))
    }

    /// Run embedded migrations. Idempotent; call once at startup.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    /// Create an account, returning the newly assigned id.
    pub async fn signup(&self, email: &str, password: &str) -> Result<i64, StoreError> {
        if email.is_empty() || password.is_empty() {
            return Err(StoreError::Validation(
                "Email and password are required".to_string(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(StoreError::Validation(
                "Password must be at least 6 characters long".to_string(),
            ));
        }

        let password_hash =
            bcrypt::hash(password, BCRYPT_COST).map_err(|e| StoreError::Storage(e.to_string()))?;

        let result =
            sqlx::query("INSERT INTO accounts (email, password_hash, created_at) VALUES (?, ?, ?)")
                .bind(email)
                .bind(&password_hash)
                .bind(Utc::now())
                .execute(&self.pool)
                .await
                .map_err(|e| match &e {
                    sqlx::Error::Database(db) if db.is_unique_violation() => {
                        StoreError::DuplicateEmail
                    }
                    _ => StoreError::Storage(e.to_string()),
                })?;

        Ok(result.last_insert_rowid())
    }

    /// Verify credentials, returning the account id on success.
    ///
    /// Unknown email and wrong password take the same error path so the
    /// response cannot be used to probe for registered addresses.
    pub async fn login(&self, email: &str, password: &str) -> Result<i64, StoreError> {
        if email.is_empty() || password.is_empty() {
            return Err(StoreError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let Some(account) = self.find_by_email(email).await? else {
            return Err(StoreError::InvalidCredentials);
        };

        let matches = bcrypt::verify(password, &account.password_hash)
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        if !matches {
            return Err(StoreError::InvalidCredentials);
        }

        Ok(account.id)
    }

    /// Look up the full account row by exact email match.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        Ok(row.map(|row| Account {
            id: row.get("id"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            created_at: row.get::<DateTime<Utc>, _>("created_at"),
        }))
    }

    /// Look up an account by id, projecting only the client-safe columns.
    pub async fn get_profile(&self, id: i64) -> Result<AccountProfile, StoreError> {
        let row = sqlx::query("SELECT id, email, created_at FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        match row {
            Some(row) => Ok(AccountProfile {
                id: row.get("id"),
                email: row.get("email"),
                created_at: row.get::<DateTime<Utc>, _>("created_at"),
            }),
            None => Err(StoreError::NotFound),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
