//! In-process storage backend.
//!
//! [`MemoryStore`] implements every repository trait over plain vectors
//! behind a lock. It is selected with `DATABASE_URL=memory` and backs the
//! HTTP integration tests. Ordering follows PostgreSQL: NULLs sort last
//! ascending and first descending, ties break on id. Text compares by
//! bytes rather than by collation.

use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entities::{
    Click, ClickWithLink, Link, LinkUpdate, LinkWithClicks, NewClick, NewLink,
};
use crate::domain::listing::{ClickQuery, ClickSortField, LinkQuery, LinkSortField, SortOrder};
use crate::domain::repositories::{ApiToken, ClickRepository, LinkRepository, TokenRepository};
use crate::error::AppError;
use crate::utils::id_generator::generate_id;

#[derive(Default)]
struct Tables {
    links: Vec<Link>,
    clicks: Vec<Click>,
    tokens: Vec<ApiToken>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables.read().map_err(|_| {
            tracing::error!("Memory store lock poisoned");
            AppError::internal()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables.write().map_err(|_| {
            tracing::error!("Memory store lock poisoned");
            AppError::internal()
        })
    }
}

/// NULL is greater than any value, as in PostgreSQL.
fn cmp_nullable(a: Option<&String>, b: Option<&String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn cmp_links(a: &Link, b: &Link, query: LinkQuery) -> Ordering {
    let by_field = match query.sort_by {
        LinkSortField::Name => a.name.cmp(&b.name),
        LinkSortField::Alias => a.alias.cmp(&b.alias),
        LinkSortField::Url => a.url.cmp(&b.url),
        LinkSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        LinkSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    };

    directed(by_field, query.order).then_with(|| a.id.cmp(&b.id))
}

fn cmp_clicks(a: &Click, b: &Click, query: ClickQuery) -> Ordering {
    let by_field = match query.sort_by {
        ClickSortField::IpAddress => cmp_nullable(a.ip_address.as_ref(), b.ip_address.as_ref()),
        ClickSortField::UserAgent => cmp_nullable(a.user_agent.as_ref(), b.user_agent.as_ref()),
        ClickSortField::Referer => cmp_nullable(a.referer.as_ref(), b.referer.as_ref()),
        ClickSortField::Platform => cmp_nullable(a.platform.as_ref(), b.platform.as_ref()),
        ClickSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        ClickSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    };

    directed(by_field, query.order).then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut tables = self.write()?;

        if tables.links.iter().any(|l| l.alias == new_link.alias) {
            return Err(AppError::conflict("Alias already taken"));
        }

        let now = Utc::now();
        let link = Link {
            id: new_link.id,
            name: new_link.name,
            alias: new_link.alias,
            url: new_link.url,
            created_at: now,
            updated_at: now,
        };
        tables.links.push(link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        Ok(self.read()?.links.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .read()?
            .links
            .iter()
            .find(|l| l.alias == alias)
            .cloned())
    }

    async fn list(
        &self,
        query: LinkQuery,
        include_clicks: bool,
    ) -> Result<Vec<LinkWithClicks>, AppError> {
        let tables = self.read()?;

        let mut links = tables.links.clone();
        links.sort_by(|a, b| cmp_links(a, b, query));

        Ok(links
            .into_iter()
            .map(|link| {
                let mut clicks: Vec<Click> = tables
                    .clicks
                    .iter()
                    .filter(|c| c.link_id == link.id)
                    .cloned()
                    .collect();
                clicks.sort_by(|a, b| {
                    a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id))
                });

                LinkWithClicks {
                    click_count: clicks.len() as i64,
                    clicks: include_clicks.then_some(clicks),
                    link,
                }
            })
            .collect())
    }

    async fn update(&self, id: &str, update: LinkUpdate) -> Result<Option<Link>, AppError> {
        let mut tables = self.write()?;

        if tables
            .links
            .iter()
            .any(|l| l.alias == update.alias && l.id != id)
        {
            return Err(AppError::conflict("Alias already taken"));
        }

        let Some(link) = tables.links.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };

        link.name = update.name;
        link.alias = update.alias;
        link.url = update.url;
        link.updated_at = Utc::now();

        Ok(Some(link.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut tables = self.write()?;

        let before = tables.links.len();
        tables.links.retain(|l| l.id != id);
        if tables.links.len() == before {
            return Ok(false);
        }

        tables.clicks.retain(|c| c.link_id != id);
        Ok(true)
    }

    async fn delete_many(&self, ids: Vec<String>) -> Result<u64, AppError> {
        let mut tables = self.write()?;

        let ids: HashSet<String> = ids.into_iter().collect();
        let found = tables.links.iter().filter(|l| ids.contains(&l.id)).count();
        if found != ids.len() {
            return Err(AppError::not_found("Link not found"));
        }

        tables.links.retain(|l| !ids.contains(&l.id));
        tables.clicks.retain(|c| !ids.contains(&c.link_id));

        Ok(found as u64)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.read()?.links.len() as i64)
    }
}

#[async_trait]
impl ClickRepository for MemoryStore {
    async fn create(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tables = self.write()?;

        if !tables.links.iter().any(|l| l.id == new_click.link_id) {
            tracing::error!(link_id = %new_click.link_id, "Click references a missing link");
            return Err(AppError::internal());
        }

        let now = Utc::now();
        let click = Click {
            id: new_click.id,
            link_id: new_click.link_id,
            ip_address: new_click.ip_address,
            user_agent: new_click.user_agent,
            referer: new_click.referer,
            platform: new_click.platform,
            created_at: now,
            updated_at: now,
        };
        tables.clicks.push(click.clone());

        Ok(click)
    }

    async fn list(
        &self,
        query: ClickQuery,
        include_link: bool,
    ) -> Result<Vec<ClickWithLink>, AppError> {
        let tables = self.read()?;

        let mut clicks = tables.clicks.clone();
        clicks.sort_by(|a, b| cmp_clicks(a, b, query));
        clicks.truncate(usize::try_from(query.limit).unwrap_or(0));

        Ok(clicks
            .into_iter()
            .map(|click| {
                let link = include_link
                    .then(|| tables.links.iter().find(|l| l.id == click.link_id).cloned())
                    .flatten();
                ClickWithLink { click, link }
            })
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut tables = self.write()?;

        let before = tables.clicks.len();
        tables.clicks.retain(|c| c.id != id);

        Ok(tables.clicks.len() != before)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.read()?.clicks.len() as i64)
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn exists(&self, token: &str) -> Result<bool, AppError> {
        Ok(self.read()?.tokens.iter().any(|t| t.token == token))
    }

    async fn create(&self, token: &str, note: Option<String>) -> Result<ApiToken, AppError> {
        let mut tables = self.write()?;

        if tables.tokens.iter().any(|t| t.token == token) {
            return Err(AppError::conflict("Token already exists"));
        }

        let api_token = ApiToken {
            id: generate_id(),
            token: token.to_string(),
            note,
            created_at: Utc::now(),
        };
        tables.tokens.push(api_token.clone());

        Ok(api_token)
    }

    async fn list(&self) -> Result<Vec<ApiToken>, AppError> {
        let mut tokens = self.read()?.tokens.clone();
        tokens.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(tokens)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut tables = self.write()?;

        let before = tables.tokens.len();
        tables.tokens.retain(|t| t.id != id);

        Ok(tables.tokens.len() != before)
    }
}
