use std::sync::Arc;

use crate::config::Config;
use crate::db::{AccountStore, Store};
use crate::services::{AccountService, DefaultAccountService};

/// Process-wide services, built once from config and handed to the HTTP
/// layer and the CLI commands.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub account_service: Arc<dyn AccountService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::from_config(&config.general).await?;
        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let account_store: Arc<dyn AccountStore> = Arc::new(store.clone());
        let account_service = Arc::new(DefaultAccountService::new(
            account_store,
            config.security.clone(),
        )) as Arc<dyn AccountService>;

        Self {
            config: Arc::new(config),
            store,
            account_service,
        }
    }
}
