//! Handlers for click analytics endpoints.

use axum::extract::{Path, State};

use crate::api::dto::click::ClickListItem;
use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::query::ListClicksParams;
use crate::api::extract::ApiQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Lists recorded clicks.
///
/// # Endpoint
///
/// `GET /api/clicks?sort_by=createdAt&order=asc&limit=100&with_links=0`
///
/// Null values sort last ascending and first descending.
///
/// # Errors
///
/// Returns 400 Bad Request for unaccepted query values or a limit outside
/// `1..=1000`.
pub async fn list_clicks_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListClicksParams>,
) -> Result<ApiResponse<Vec<ClickListItem>>, AppError> {
    let (query, with_links) = params.parse()?;

    let clicks = state.click_service.list(query, with_links).await?;

    Ok(ApiResponse::ok(
        "Clicks retrieved successfully",
        clicks.into_iter().map(ClickListItem::from).collect(),
    ))
}

/// Deletes one click.
///
/// # Endpoint
///
/// `DELETE /api/clicks/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no click has this id.
pub async fn delete_click_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<ApiResponse<()>, AppError> {
    state.click_service.delete(&id).await?;

    Ok(ApiResponse::message("Click deleted successfully"))
}
