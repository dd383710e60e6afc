//! PostgreSQL implementation of token repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::{TOKEN_COLUMNS, TokenRow};
use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;
use crate::utils::db_error::{TOKENS_TOKEN_KEY, is_unique_violation_on};
use crate::utils::id_generator::generate_id;

/// PostgreSQL repository for API token storage and lookup.
pub struct PgTokenRepository {
    pool: Arc<PgPool>,
}

impl PgTokenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn exists(&self, token: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tokens WHERE token = $1)")
                .bind(token)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn create(&self, token: &str, note: Option<String>) -> Result<ApiToken, AppError> {
        let sql = format!(
            "INSERT INTO tokens (id, token, note) VALUES ($1, $2, $3) RETURNING {TOKEN_COLUMNS}"
        );

        let row: TokenRow = sqlx::query_as(&sql)
            .bind(generate_id())
            .bind(token)
            .bind(note)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation_on(&e, TOKENS_TOKEN_KEY) {
                    AppError::conflict("Token already exists")
                } else {
                    e.into()
                }
            })?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<ApiToken>, AppError> {
        let sql = format!("SELECT {TOKEN_COLUMNS} FROM tokens ORDER BY created_at ASC, id ASC");

        let rows: Vec<TokenRow> = sqlx::query_as(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(ApiToken::from).collect())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tokens WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
