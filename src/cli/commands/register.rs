//! Register command handler

use crate::config::Config;
use crate::services::AccountError;
use crate::state::SharedState;

pub async fn cmd_register(config: Config, username: &str, password: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    match state.account_service.register(username, password).await {
        Ok(account) => {
            println!("Registered '{}' (id {})", account.username, account.id);
            Ok(())
        }
        Err(AccountError::DuplicateUsername) => {
            anyhow::bail!("Username '{username}' already exists")
        }
        Err(e) => Err(e.into()),
    }
}
