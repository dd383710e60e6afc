//! Public informational handlers and the fallback.

use axum::{http::header, response::IntoResponse};

use crate::api::dto::app_info::{ApiWelcome, AppInfo, AppMeta};
use crate::api::dto::envelope::ApiResponse;
use crate::error::AppError;
use crate::api::routes;

const LICENSE_TEXT: &str = include_str!("../../../LICENSE");

/// `GET /`: package metadata and the route index.
pub async fn root_handler() -> ApiResponse<AppInfo> {
    ApiResponse::ok(
        "Welcome to the Bitlie RESTful API",
        AppInfo {
            app: AppMeta::current(),
            api: routes::route_index(),
        },
    )
}

/// `GET /api`
pub async fn api_welcome_handler() -> impl IntoResponse {
    axum::Json(ApiWelcome {
        message: "Welcome to the API!",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /LICENSE`
pub async fn license_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        LICENSE_TEXT,
    )
}

/// Answers paths that match neither a route nor a public file.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("Sorry, the requested resource could not be found.")
}
