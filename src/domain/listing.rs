//! Sorting and list queries for links and clicks.
//!
//! Sort fields are closed enums so storage backends can map them onto
//! column names without interpolating user input.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum LinkSortField {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "alias")]
    Alias,
    #[serde(rename = "url")]
    Url,
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "updatedAt")]
    UpdatedAt,
}

impl LinkSortField {
    pub const ACCEPTED: &'static [&'static str] =
        &["name", "alias", "url", "createdAt", "updatedAt"];

    pub fn column(self) -> &'static str {
        match self {
            LinkSortField::Name => "name",
            LinkSortField::Alias => "alias",
            LinkSortField::Url => "url",
            LinkSortField::CreatedAt => "created_at",
            LinkSortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ClickSortField {
    #[serde(rename = "ipAddress")]
    IpAddress,
    #[serde(rename = "userAgent")]
    UserAgent,
    #[serde(rename = "referer")]
    Referer,
    #[serde(rename = "platform")]
    Platform,
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "updatedAt")]
    UpdatedAt,
}

impl ClickSortField {
    pub const ACCEPTED: &'static [&'static str] = &[
        "ipAddress",
        "userAgent",
        "referer",
        "platform",
        "createdAt",
        "updatedAt",
    ];

    pub fn column(self) -> &'static str {
        match self {
            ClickSortField::IpAddress => "ip_address",
            ClickSortField::UserAgent => "user_agent",
            ClickSortField::Referer => "referer",
            ClickSortField::Platform => "platform",
            ClickSortField::CreatedAt => "created_at",
            ClickSortField::UpdatedAt => "updated_at",
        }
    }
}

/// Ordering for link listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkQuery {
    pub sort_by: LinkSortField,
    pub order: SortOrder,
}

/// Ordering and row limit for click listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickQuery {
    pub sort_by: ClickSortField,
    pub order: SortOrder,
    pub limit: i64,
}

impl ClickQuery {
    pub const DEFAULT_LIMIT: i64 = 100;
}

impl Default for ClickQuery {
    fn default() -> Self {
        Self {
            sort_by: ClickSortField::default(),
            order: SortOrder::default(),
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = LinkQuery::default();
        assert_eq!(query.sort_by, LinkSortField::CreatedAt);
        assert_eq!(query.order, SortOrder::Asc);

        let query = ClickQuery::default();
        assert_eq!(query.limit, 100);
        assert_eq!(query.sort_by.column(), "created_at");
    }

    #[test]
    fn test_sort_fields_deserialize_from_camel_case() {
        let field: LinkSortField = serde_json::from_str(r#""updatedAt""#).unwrap();
        assert_eq!(field, LinkSortField::UpdatedAt);

        let field: ClickSortField = serde_json::from_str(r#""ipAddress""#).unwrap();
        assert_eq!(field.column(), "ip_address");

        assert!(serde_json::from_str::<LinkSortField>(r#""created_at""#).is_err());
    }

    #[test]
    fn test_sort_order_sql() {
        assert_eq!(SortOrder::Asc.as_sql(), "ASC");
        assert_eq!(SortOrder::Desc.as_sql(), "DESC");
    }
}
