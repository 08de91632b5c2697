use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

use crate::db::StoreError;
use crate::entities::accounts;

pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<accounts::Model>, StoreError> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.conn)
            .await?;

        Ok(account)
    }

    pub async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<accounts::Model, StoreError> {
        let active = accounts::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        match active.insert(&self.conn).await {
            Ok(model) => Ok(model),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    Err(StoreError::ConstraintViolation(detail))
                }
                _ => Err(err.into()),
            },
        }
    }

    pub async fn list_all(&self) -> Result<Vec<accounts::Model>, StoreError> {
        let accounts = accounts::Entity::find()
            .order_by_asc(accounts::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(accounts)
    }
}
