//! Handlers for link management endpoints.

use axum::extract::{Path, State};

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::link::{
    CreatedLink, DeleteLinksPayload, DeletedCount, LinkListItem, LinkPayload, LinkResponse,
};
use crate::api::dto::query::{CreateLinkParams, ListLinksParams};
use crate::api::extract::{ApiQuery, ValidatedBody};
use crate::domain::entities::LinkWithClicks;
use crate::domain::listing::LinkQuery;
use crate::error::AppError;
use crate::state::AppState;

fn list_items(links: Vec<LinkWithClicks>) -> Vec<LinkListItem> {
    links.into_iter().map(LinkListItem::from).collect()
}

/// Lists every link with its click count.
///
/// # Endpoint
///
/// `GET /api/links?sort_by=createdAt&order=asc&with_clicks=0`
///
/// `with_clicks=1` embeds each link's clicks, oldest first.
///
/// # Errors
///
/// Returns 400 Bad Request for unaccepted query values.
pub async fn list_links_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListLinksParams>,
) -> Result<ApiResponse<Vec<LinkListItem>>, AppError> {
    let (query, with_clicks) = params.parse()?;

    let links = state.link_service.list(query, with_clicks).await?;

    Ok(ApiResponse::ok("Links retrieved successfully", list_items(links)))
}

/// Returns one link.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id.
pub async fn get_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<ApiResponse<LinkResponse>, AppError> {
    let link = state.link_service.get(&id).await?;

    Ok(ApiResponse::ok(
        "Link details retrieved successfully",
        LinkResponse::from(link),
    ))
}

/// Creates a link.
///
/// # Endpoint
///
/// `POST /api/links?refetch=0`
///
/// # Request Body
///
/// JSON or urlencoded:
///
/// ```json
/// { "name": "Example", "alias": "example", "url": "https://example.com" }
/// ```
///
/// With `refetch=1` the response data is the full link list in default
/// order instead of the created link.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the alias is already taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CreateLinkParams>,
    ValidatedBody(payload): ValidatedBody<LinkPayload>,
) -> Result<ApiResponse<CreatedLink>, AppError> {
    let refetch = params.refetch()?;
    let fields = payload.into_update();

    let link = state
        .link_service
        .create(fields.name, fields.alias, fields.url)
        .await?;

    let data = if refetch {
        let links = state.link_service.list(LinkQuery::default(), false).await?;
        CreatedLink::List(list_items(links))
    } else {
        CreatedLink::Link(link.into())
    };

    Ok(ApiResponse::created("Link created successfully", data))
}

/// Replaces a link's name, alias and URL.
///
/// # Endpoint
///
/// `PUT /api/links/{id}`
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 404 Not Found if no link has this id.
/// Returns 409 Conflict if another link holds the alias.
pub async fn update_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ValidatedBody(payload): ValidatedBody<LinkPayload>,
) -> Result<ApiResponse<LinkResponse>, AppError> {
    let link = state
        .link_service
        .update(&id, payload.into_update())
        .await?;

    Ok(ApiResponse::ok(
        "Link updated successfully",
        LinkResponse::from(link),
    ))
}

/// Deletes a link and its clicks.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id.
pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<ApiResponse<()>, AppError> {
    state.link_service.delete(&id).await?;

    Ok(ApiResponse::message("Link deleted successfully"))
}

/// Deletes several links at once.
///
/// # Endpoint
///
/// `DELETE /api/links`
///
/// ```json
/// { "ids": ["id-1", "id-2"] }
/// ```
///
/// Either every link is deleted or none is.
///
/// # Errors
///
/// Returns 400 Bad Request if `ids` is empty.
/// Returns 404 Not Found if any id does not resolve.
pub async fn delete_links_handler(
    State(state): State<AppState>,
    ValidatedBody(payload): ValidatedBody<DeleteLinksPayload>,
) -> Result<ApiResponse<DeletedCount>, AppError> {
    let deleted = state.link_service.delete_many(payload.ids).await?;

    Ok(ApiResponse::ok(
        "Links deleted successfully",
        DeletedCount { deleted },
    ))
}
