//! DTOs for the click endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::dto::link::LinkResponse;
use crate::domain::entities::{Click, ClickWithLink};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickResponse {
    pub id: String,
    pub link_id: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub platform: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Click> for ClickResponse {
    fn from(click: Click) -> Self {
        Self {
            id: click.id,
            link_id: click.link_id,
            ip_address: click.ip_address,
            user_agent: click.user_agent,
            referer: click.referer,
            platform: click.platform,
            created_at: click.created_at,
            updated_at: click.updated_at,
        }
    }
}

/// A click in list responses, with its link when requested.
#[derive(Debug, Serialize)]
pub struct ClickListItem {
    #[serde(flatten)]
    pub click: ClickResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkResponse>,
}

impl From<ClickWithLink> for ClickListItem {
    fn from(item: ClickWithLink) -> Self {
        Self {
            click: item.click.into(),
            link: item.link.map(LinkResponse::from),
        }
    }
}
