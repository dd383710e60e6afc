//! Link entity representing an alias → URL mapping.

use chrono::{DateTime, Utc};

use crate::domain::entities::Click;
use crate::utils::id_generator::generate_id;

/// A named short link.
///
/// `alias` is unique across all links and is matched case-sensitively
/// on redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: String,
    pub name: String,
    pub alias: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new link.
///
/// The id is generated on construction so every backend stores the same
/// kind of key.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub id: String,
    pub name: String,
    pub alias: String,
    pub url: String,
}

impl NewLink {
    pub fn new(name: String, alias: String, url: String) -> Self {
        Self {
            id: generate_id(),
            name,
            alias,
            url,
        }
    }
}

/// Full replacement of the mutable fields of a link.
#[derive(Debug, Clone)]
pub struct LinkUpdate {
    pub name: String,
    pub alias: String,
    pub url: String,
}

/// A link together with its click aggregate, as returned by listings.
///
/// `clicks` is only populated when the caller asked for the click records.
#[derive(Debug, Clone)]
pub struct LinkWithClicks {
    pub link: Link,
    pub click_count: i64,
    pub clicks: Option<Vec<Click>>,
}
