//! DTOs for the link endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

use crate::api::dto::click::ClickResponse;
use crate::domain::entities::{Link, LinkUpdate, LinkWithClicks};
use crate::utils::url_pattern::is_valid_url;

/// Compiled regex for alias validation.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid alias regex"));

fn validate_target_url(url: &str) -> Result<(), ValidationError> {
    if is_valid_url(url) {
        return Ok(());
    }
    Err(ValidationError::new("url").with_message("URL is invalid".into()))
}

/// Body of `POST /api/links` and `PUT /api/links/{id}`.
///
/// Fields are optional at the type level so a missing field is reported as
/// "required" instead of a decoding failure.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LinkPayload {
    #[serde(default)]
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Alias is required"),
        length(min = 1, message = "Alias is required"),
        regex(
            path = "*ALIAS_REGEX",
            message = "Alias must be alphanumeric and hyphens and underscores only"
        )
    )]
    pub alias: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "URL is required"),
        custom(function = "validate_target_url", message = "URL is invalid")
    )]
    pub url: Option<String>,
}

impl LinkPayload {
    /// Converts a validated payload into its fields.
    ///
    /// Call only after [`Validate::validate`] succeeded; missing fields
    /// become empty strings.
    pub fn into_update(self) -> LinkUpdate {
        LinkUpdate {
            name: self.name.unwrap_or_default(),
            alias: self.alias.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
        }
    }
}

/// Body of `DELETE /api/links`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DeleteLinksPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "ID is required"))]
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DeletedCount {
    pub deleted: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: String,
    pub name: String,
    pub alias: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            name: link.name,
            alias: link.alias,
            url: link.url,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClickCount {
    pub clicks: i64,
}

/// A link in list responses: the record, `_count.clicks` and optional clicks.
#[derive(Debug, Serialize)]
pub struct LinkListItem {
    #[serde(flatten)]
    pub link: LinkResponse,
    #[serde(rename = "_count")]
    pub count: ClickCount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<Vec<ClickResponse>>,
}

impl From<LinkWithClicks> for LinkListItem {
    fn from(item: LinkWithClicks) -> Self {
        Self {
            link: item.link.into(),
            count: ClickCount {
                clicks: item.click_count,
            },
            clicks: item
                .clicks
                .map(|clicks| clicks.into_iter().map(ClickResponse::from).collect()),
        }
    }
}

/// Data of a create response: the new link, or the whole list on refetch.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CreatedLink {
    Link(LinkResponse),
    List(Vec<LinkListItem>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(name: Option<&str>, alias: Option<&str>, url: Option<&str>) -> LinkPayload {
        LinkPayload {
            name: name.map(str::to_string),
            alias: alias.map(str::to_string),
            url: url.map(str::to_string),
        }
    }

    fn messages(payload: &LinkPayload) -> Vec<(String, String)> {
        let errors = payload.validate().unwrap_err();
        let mut out: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    (
                        field.to_string(),
                        e.message.as_ref().map(|m| m.to_string()).unwrap_or_default(),
                    )
                })
            })
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_valid_payload() {
        let p = payload(Some("Test"), Some("test-1"), Some("https://example.com"));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_required() {
        let p = payload(None, None, None);

        assert_eq!(
            messages(&p),
            vec![
                ("alias".to_string(), "Alias is required".to_string()),
                ("name".to_string(), "Name is required".to_string()),
                ("url".to_string(), "URL is required".to_string()),
            ]
        );
    }

    #[test]
    fn test_alias_charset() {
        let p = payload(Some("Test"), Some("bad alias!"), Some("https://example.com"));

        assert_eq!(
            messages(&p),
            vec![(
                "alias".to_string(),
                "Alias must be alphanumeric and hyphens and underscores only".to_string()
            )]
        );

        let p = payload(Some("Test"), Some("Under_score-9"), Some("https://example.com"));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let p = payload(Some("Test"), Some("t"), Some("example.com"));

        assert_eq!(
            messages(&p),
            vec![("url".to_string(), "URL is invalid".to_string())]
        );
    }

    #[test]
    fn test_empty_ids_rejected() {
        let p = DeleteLinksPayload { ids: vec![] };
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_list_item_serialization() {
        let now = Utc::now();
        let item = LinkListItem::from(LinkWithClicks {
            link: Link {
                id: "l1".to_string(),
                name: "GitHub".to_string(),
                alias: "github".to_string(),
                url: "https://github.com".to_string(),
                created_at: now,
                updated_at: now,
            },
            click_count: 3,
            clicks: None,
        });

        let value = serde_json::to_value(item).unwrap();

        assert_eq!(value["alias"], "github");
        assert_eq!(value["_count"], json!({ "clicks": 3 }));
        assert!(value.get("clicks").is_none());
        assert!(value.get("createdAt").is_some());
    }
}
