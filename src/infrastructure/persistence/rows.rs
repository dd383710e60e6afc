//! Row types shared by the PostgreSQL repositories.

use chrono::{DateTime, Utc};

use crate::domain::entities::{Click, Link};
use crate::domain::repositories::ApiToken;

pub(super) const LINK_COLUMNS: &str = "id, name, alias, url, created_at, updated_at";

pub(super) const CLICK_COLUMNS: &str =
    "id, link_id, ip_address, user_agent, referer, platform, created_at, updated_at";

pub(super) const TOKEN_COLUMNS: &str = "id, token, note, created_at";

#[derive(sqlx::FromRow)]
pub(super) struct LinkRow {
    id: String,
    name: String,
    alias: String,
    url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LinkRow {
    pub(super) fn id(&self) -> &str {
        &self.id
    }
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            id: r.id,
            name: r.name,
            alias: r.alias,
            url: r.url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct LinkCountRow {
    #[sqlx(flatten)]
    pub link: LinkRow,
    pub click_count: i64,
}

#[derive(sqlx::FromRow)]
pub(super) struct ClickRow {
    id: String,
    link_id: String,
    ip_address: Option<String>,
    user_agent: Option<String>,
    referer: Option<String>,
    platform: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClickRow> for Click {
    fn from(r: ClickRow) -> Self {
        Click {
            id: r.id,
            link_id: r.link_id,
            ip_address: r.ip_address,
            user_agent: r.user_agent,
            referer: r.referer,
            platform: r.platform,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct TokenRow {
    id: String,
    token: String,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<TokenRow> for ApiToken {
    fn from(r: TokenRow) -> Self {
        ApiToken {
            id: r.id,
            token: r.token,
            note: r.note,
            created_at: r.created_at,
        }
    }
}
