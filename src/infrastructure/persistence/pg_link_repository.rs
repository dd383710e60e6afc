//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use super::rows::{CLICK_COLUMNS, ClickRow, LINK_COLUMNS, LinkCountRow, LinkRow};
use crate::domain::entities::{Click, Link, LinkUpdate, LinkWithClicks, NewLink};
use crate::domain::listing::LinkQuery;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::{LINKS_ALIAS_KEY, is_unique_violation_on};

/// PostgreSQL repository for link storage and retrieval.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn clicks_by_link(&self, link_ids: &[String]) -> Result<HashMap<String, Vec<Click>>, AppError> {
        let sql = format!(
            "SELECT {CLICK_COLUMNS} FROM clicks WHERE link_id = ANY($1) ORDER BY created_at ASC, id ASC"
        );

        let rows: Vec<ClickRow> = sqlx::query_as(&sql)
            .bind(link_ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        let mut grouped: HashMap<String, Vec<Click>> = HashMap::new();
        for row in rows {
            let click = Click::from(row);
            grouped.entry(click.link_id.clone()).or_default().push(click);
        }

        Ok(grouped)
    }
}

fn map_alias_conflict(e: sqlx::Error) -> AppError {
    if is_unique_violation_on(&e, LINKS_ALIAS_KEY) {
        return AppError::conflict("Alias already taken");
    }
    e.into()
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (id, name, alias, url) VALUES ($1, $2, $3, $4) RETURNING {LINK_COLUMNS}"
        );

        let row: LinkRow = sqlx::query_as(&sql)
            .bind(&new_link.id)
            .bind(&new_link.name)
            .bind(&new_link.alias)
            .bind(&new_link.url)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_alias_conflict)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1");

        let row: Option<LinkRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE alias = $1");

        let row: Option<LinkRow> = sqlx::query_as(&sql)
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn list(
        &self,
        query: LinkQuery,
        include_clicks: bool,
    ) -> Result<Vec<LinkWithClicks>, AppError> {
        // Column and direction come from closed enums, never from input.
        let sql = format!(
            r#"
            SELECT l.id, l.name, l.alias, l.url, l.created_at, l.updated_at,
                   (SELECT COUNT(*) FROM clicks c WHERE c.link_id = l.id) AS click_count
            FROM links l
            ORDER BY l.{} {}, l.id ASC
            "#,
            query.sort_by.column(),
            query.order.as_sql()
        );

        let rows: Vec<LinkCountRow> = sqlx::query_as(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        let mut clicks = if include_clicks && !rows.is_empty() {
            let ids: Vec<String> = rows.iter().map(|r| r.link.id().to_string()).collect();
            Some(self.clicks_by_link(&ids).await?)
        } else {
            None
        };

        Ok(rows
            .into_iter()
            .map(|r| {
                let link = Link::from(r.link);
                let link_clicks = clicks
                    .as_mut()
                    .map(|grouped| grouped.remove(&link.id).unwrap_or_default());
                LinkWithClicks {
                    link,
                    click_count: r.click_count,
                    clicks: link_clicks,
                }
            })
            .collect())
    }

    async fn update(&self, id: &str, update: LinkUpdate) -> Result<Option<Link>, AppError> {
        let sql = format!(
            r#"
            UPDATE links
            SET name = $2, alias = $3, url = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {LINK_COLUMNS}
            "#
        );

        let row: Option<LinkRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(&update.name)
            .bind(&update.alias)
            .bind(&update.url)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_alias_conflict)?;

        Ok(row.map(Link::from))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: Vec<String>) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM links WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() != ids.len() as u64 {
            tx.rollback().await?;
            return Err(AppError::not_found("Link not found"));
        }

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
