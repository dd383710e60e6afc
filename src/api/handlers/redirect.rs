//! Handler for alias redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::query::RedirectParams;
use crate::api::extract::{ApiQuery, PeerAddr};
use crate::domain::entities::Visitor;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client;
use crate::utils::location::encode_location;

/// Redirects an alias to its target URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Request Flow
///
/// 1. Look up the link by its exact alias
/// 2. Unless `nc=1`, record a click with the visitor metadata
/// 3. Return `301 Moved Permanently` to the stored URL
///
/// The click is written before the response is sent, so a storage failure
/// yields a 500 and never a redirect.
///
/// # Visitor Metadata
///
/// - IP: first `X-Forwarded-For` entry, else the peer address
/// - `User-Agent` and `Referer` verbatim
/// - Platform: `Sec-CH-UA-Platform` with quotes removed
///
/// # Errors
///
/// Returns 404 Not Found if no link has this alias.
/// Returns 400 Bad Request if `nc` is neither `0` nor `1`.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RedirectParams>,
    PeerAddr(peer): PeerAddr,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let visitor = params.track_click()?.then(|| Visitor {
        ip_address: client::client_ip(&headers, peer),
        user_agent: client::user_agent(&headers),
        referer: client::referer(&headers),
        platform: client::platform(&headers),
    });

    let link = state.redirect_service.resolve(&alias, visitor).await?;

    let location = HeaderValue::from_str(&encode_location(&link.url)).map_err(|e| {
        tracing::error!(error = %e, link_id = %link.id, "Stored URL is not a valid header value");
        AppError::internal()
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}
