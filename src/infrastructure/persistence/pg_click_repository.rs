//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use super::rows::{CLICK_COLUMNS, ClickRow, LINK_COLUMNS, LinkRow};
use crate::domain::entities::{Click, ClickWithLink, Link, NewClick};
use crate::domain::listing::ClickQuery;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for click events.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn links_by_id(&self, ids: &[String]) -> Result<HashMap<String, Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = ANY($1)");

        let rows: Vec<LinkRow> = sqlx::query_as(&sql)
            .bind(ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(Link::from)
            .map(|link| (link.id.clone(), link))
            .collect())
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn create(&self, new_click: NewClick) -> Result<Click, AppError> {
        let sql = format!(
            r#"
            INSERT INTO clicks (id, link_id, ip_address, user_agent, referer, platform)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CLICK_COLUMNS}
            "#
        );

        let row: ClickRow = sqlx::query_as(&sql)
            .bind(&new_click.id)
            .bind(&new_click.link_id)
            .bind(&new_click.ip_address)
            .bind(&new_click.user_agent)
            .bind(&new_click.referer)
            .bind(&new_click.platform)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn list(
        &self,
        query: ClickQuery,
        include_link: bool,
    ) -> Result<Vec<ClickWithLink>, AppError> {
        // PostgreSQL puts NULLs last for ASC and first for DESC by default.
        let sql = format!(
            "SELECT {CLICK_COLUMNS} FROM clicks ORDER BY {} {}, id ASC LIMIT $1",
            query.sort_by.column(),
            query.order.as_sql()
        );

        let clicks: Vec<Click> = sqlx::query_as::<_, ClickRow>(&sql)
            .bind(query.limit)
            .fetch_all(self.pool.as_ref())
            .await?
            .into_iter()
            .map(Click::from)
            .collect();

        if !include_link || clicks.is_empty() {
            return Ok(clicks
                .into_iter()
                .map(|click| ClickWithLink { click, link: None })
                .collect());
        }

        let mut link_ids: Vec<String> = clicks.iter().map(|c| c.link_id.clone()).collect();
        link_ids.sort();
        link_ids.dedup();
        let links = self.links_by_id(&link_ids).await?;

        Ok(clicks
            .into_iter()
            .map(|click| {
                let link = links.get(&click.link_id).cloned();
                ClickWithLink { click, link }
            })
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clicks WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
