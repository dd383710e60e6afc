//! Handler for runtime statistics.

use axum::extract::State;

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns process and storage statistics.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Response
///
/// ```json
/// {
///   "appVersion": "1.0.0",
///   "platform": "linux",
///   "arch": "x86_64",
///   "pid": 4242,
///   "uptime": 12.5,
///   "memoryUsageMB": { "rss": "24.10", "virtual": "512.00" },
///   "links": { "total": 10, "clicks": 120 }
/// }
/// ```
pub async fn stats_handler(
    State(state): State<AppState>,
) -> Result<ApiResponse<StatsResponse>, AppError> {
    let stats = state.stats_service.snapshot().await?;

    Ok(ApiResponse::ok(
        "Retrieved stats successfully!",
        StatsResponse::from(stats),
    ))
}
