//! Store-backed implementation of the `AccountService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;
use tracing::{debug, info};

use crate::config::SecurityConfig;
use crate::db::AccountStore;
use crate::models::account::Account;
use crate::services::account_service::{AccountError, AccountService};
use crate::services::password::hash_password;

pub struct DefaultAccountService {
    store: Arc<dyn AccountStore>,
    security: SecurityConfig,
}

impl DefaultAccountService {
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AccountService for DefaultAccountService {
    async fn register(&self, username: &str, password: &str) -> Result<Account, AccountError> {
        if username.trim().is_empty() {
            return Err(AccountError::InvalidInput("username is required".to_string()));
        }
        if password.is_empty() {
            return Err(AccountError::InvalidInput("password is required".to_string()));
        }

        if self.store.find_by_username(username).await?.is_some() {
            debug!(username, "Rejected registration for existing username");
            return Err(AccountError::DuplicateUsername);
        }

        let password = password.to_string();
        let security = self.security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .map_err(|e| AccountError::Hashing(format!("hashing task panicked: {e}")))?
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        // A concurrent registration can still win between the lookup and
        // here; the store reports it as a constraint violation.
        let record = self.store.insert(username, &password_hash).await?;

        metrics::counter!("accounts_registered_total").increment(1);
        info!(account_id = record.id, username = %record.username, "Account registered");

        Ok(Account::from(record))
    }

    async fn list_usernames(&self) -> Result<Vec<String>, AccountError> {
        let accounts = self.store.list_all().await?;
        Ok(accounts.into_iter().map(|a| a.username).collect())
    }
}
