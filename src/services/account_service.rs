//! Domain service for account registration and listing.

use thiserror::Error;

use crate::db::StoreError;
use crate::models::account::Account;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConstraintViolation(_) => Self::DuplicateUsername,
            StoreError::Database(e) => Self::Storage(e.to_string()),
        }
    }
}

/// Domain service trait for accounts.
#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Creates an account with a salted hash of `password`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidInput`] if either field is empty and
    /// [`AccountError::DuplicateUsername`] if the name is taken, including
    /// when a concurrent registration wins the insert.
    async fn register(&self, username: &str, password: &str) -> Result<Account, AccountError>;

    /// Usernames of all accounts in registration order.
    async fn list_usernames(&self) -> Result<Vec<String>, AccountError>;
}
