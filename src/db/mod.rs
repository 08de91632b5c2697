use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::GeneralConfig;

pub mod migrator;
pub mod repositories;

pub use crate::entities::accounts::Model as AccountRecord;

/// Errors reported by the account store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The write would break a uniqueness rule.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Persistence seam for account records.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Exact, case-sensitive lookup. A miss is `Ok(None)`.
    async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, StoreError>;

    /// Inserts a new account, failing with [`StoreError::ConstraintViolation`]
    /// if the username is taken.
    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AccountRecord, StoreError>;

    /// All accounts in insertion order.
    async fn list_all(&self) -> Result<Vec<AccountRecord>, StoreError>;
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1, false).await
    }

    pub async fn from_config(general: &GeneralConfig) -> Result<Self> {
        Self::with_pool_options(
            &general.database_path,
            general.max_db_connections,
            general.min_db_connections,
            general.debug,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
        sql_logging: bool,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path) = sqlite_file_path(db_url) {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            if !path.exists() {
                std::fs::File::create(path)
                    .with_context(|| format!("Failed to create database {}", path.display()))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(sql_logging);

        let conn = Database::connect(opt)
            .await
            .with_context(|| format!("Failed to connect to {db_url}"))?;

        migrator::Migrator::up(&conn, None)
            .await
            .context("Failed to apply migrations")?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }
}

#[async_trait]
impl AccountStore for Store {
    async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, StoreError> {
        self.account_repo().find_by_username(username).await
    }

    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AccountRecord, StoreError> {
        self.account_repo().insert(username, password_hash).await
    }

    async fn list_all(&self) -> Result<Vec<AccountRecord>, StoreError> {
        self.account_repo().list_all().await
    }
}

/// On-disk path of a `sqlite:` URL, or `None` for in-memory databases.
fn sqlite_file_path(db_url: &str) -> Option<&Path> {
    if db_url.contains(":memory:") || db_url.contains("mode=memory") {
        return None;
    }

    let rest = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);

    (!path.is_empty()).then(|| Path::new(path))
}
