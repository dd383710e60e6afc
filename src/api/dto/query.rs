//! Query string parameters.
//!
//! Every parameter arrives as an optional string and is checked against its
//! accepted values, so one request can report several bad parameters at once.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::de::value::{Error as ValueError, StrDeserializer};

use crate::domain::listing::{ClickQuery, ClickSortField, LinkQuery, LinkSortField, SortOrder};
use crate::error::{AppError, FieldError};

/// A `"1"`/`"0"` switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum BinaryFlag {
    #[serde(rename = "1")]
    On,
    #[default]
    #[serde(rename = "0")]
    Off,
}

impl BinaryFlag {
    pub const ACCEPTED: &'static [&'static str] = &["1", "0"];

    pub fn is_on(self) -> bool {
        self == BinaryFlag::On
    }
}

const SORT_ORDERS: &[&str] = &["asc", "desc"];

pub const CLICK_LIMIT_MAX: i64 = 1000;

/// Parses `raw` as one of `accepted`, recording a field error otherwise.
///
/// Absent values, and values that fail, yield `T::default()`.
fn parse_choice<T>(
    path: &str,
    raw: Option<&str>,
    accepted: &[&str],
    errors: &mut Vec<FieldError>,
) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = raw else {
        return T::default();
    };

    match T::deserialize(StrDeserializer::<ValueError>::new(raw)) {
        Ok(value) => value,
        Err(_) => {
            let expected = accepted
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(" | ");
            errors.push(FieldError::new(
                path,
                format!("Invalid enum value. Expected {expected}, received '{raw}'"),
            ));
            T::default()
        }
    }
}

fn finish<T>(value: T, errors: Vec<FieldError>) -> Result<T, AppError> {
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(AppError::bad_request(errors))
    }
}

/// `GET /api/links` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListLinksParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub with_clicks: Option<String>,
}

impl ListLinksParams {
    /// Returns the listing order and whether to embed clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming every unaccepted parameter.
    pub fn parse(&self) -> Result<(LinkQuery, bool), AppError> {
        let mut errors = Vec::new();

        let query = LinkQuery {
            sort_by: parse_choice(
                "sort_by",
                self.sort_by.as_deref(),
                LinkSortField::ACCEPTED,
                &mut errors,
            ),
            order: parse_choice::<SortOrder>("order", self.order.as_deref(), SORT_ORDERS, &mut errors),
        };
        let with_clicks: BinaryFlag = parse_choice(
            "with_clicks",
            self.with_clicks.as_deref(),
            BinaryFlag::ACCEPTED,
            &mut errors,
        );

        finish((query, with_clicks.is_on()), errors)
    }
}

/// `GET /api/clicks` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListClicksParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub limit: Option<String>,
    pub with_links: Option<String>,
}

impl ListClicksParams {
    /// Returns the listing query and whether to embed parent links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming every unaccepted parameter.
    pub fn parse(&self) -> Result<(ClickQuery, bool), AppError> {
        let mut errors = Vec::new();

        let sort_by: ClickSortField = parse_choice(
            "sort_by",
            self.sort_by.as_deref(),
            ClickSortField::ACCEPTED,
            &mut errors,
        );
        let order: SortOrder = parse_choice("order", self.order.as_deref(), SORT_ORDERS, &mut errors);
        let with_links: BinaryFlag = parse_choice(
            "with_links",
            self.with_links.as_deref(),
            BinaryFlag::ACCEPTED,
            &mut errors,
        );

        let limit = match self.limit.as_deref().map(str::parse::<i64>) {
            None => ClickQuery::DEFAULT_LIMIT,
            Some(Ok(limit)) if (1..=CLICK_LIMIT_MAX).contains(&limit) => limit,
            Some(Ok(_)) => {
                errors.push(FieldError::new(
                    "limit",
                    format!("Limit must be between 1 and {CLICK_LIMIT_MAX}"),
                ));
                ClickQuery::DEFAULT_LIMIT
            }
            Some(Err(_)) => {
                errors.push(FieldError::new("limit", "Limit must be an integer"));
                ClickQuery::DEFAULT_LIMIT
            }
        };

        let query = ClickQuery {
            sort_by,
            order,
            limit,
        };

        finish((query, with_links.is_on()), errors)
    }
}

/// `GET /{alias}` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectParams {
    /// "no click": `1` redirects without recording.
    pub nc: Option<String>,
}

impl RedirectParams {
    /// Returns `true` if a click should be recorded.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `nc` is not `0` or `1`.
    pub fn track_click(&self) -> Result<bool, AppError> {
        let mut errors = Vec::new();
        let nc: BinaryFlag = parse_choice("nc", self.nc.as_deref(), BinaryFlag::ACCEPTED, &mut errors);
        finish(!nc.is_on(), errors)
    }
}

/// `POST /api/links` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CreateLinkParams {
    /// `1` answers with the full link list instead of the created link.
    pub refetch: Option<String>,
}

impl CreateLinkParams {
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `refetch` is not `0` or `1`.
    pub fn refetch(&self) -> Result<bool, AppError> {
        let mut errors = Vec::new();
        let refetch: BinaryFlag = parse_choice(
            "refetch",
            self.refetch.as_deref(),
            BinaryFlag::ACCEPTED,
            &mut errors,
        );
        finish(refetch.is_on(), errors)
    }
}
