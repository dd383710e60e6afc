//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

use crate::domain::entities::Link;
use crate::utils::id_generator::generate_id;

/// A visit recorded when a short link is followed.
///
/// Visitor metadata is optional: any of the headers may be absent, and the
/// peer address is unknown when the server runs without connect info.
#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub id: String,
    pub link_id: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub platform: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Visitor metadata captured from a redirect request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Visitor {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub platform: Option<String>,
}

/// Input data for recording a click.
///
/// `link_id` must reference an existing link.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub id: String,
    pub link_id: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub platform: Option<String>,
}

impl NewClick {
    pub fn new(link_id: String, visitor: Visitor) -> Self {
        Self {
            id: generate_id(),
            link_id,
            ip_address: visitor.ip_address,
            user_agent: visitor.user_agent,
            referer: visitor.referer,
            platform: visitor.platform,
        }
    }
}

/// A click with its parent link, when the caller asked for it.
#[derive(Debug, Clone)]
pub struct ClickWithLink {
    pub click: Click,
    pub link: Option<Link>,
}
