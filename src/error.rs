//! Application error type and its HTTP envelope.
//!
//! Every failure of a repository, service or handler is an [`AppError`].
//! Converting it into a response produces the error form of the envelope:
//!
//! ```json
//! { "code": 400, "status": "error", "message": "Bad Request", "errors": [{ "path": "alias", "message": "Alias is required" }] }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    Conflict { message: String },
    #[error("{message}")]
    Internal { message: String },
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl AppError {
    pub fn bad_request(errors: Vec<FieldError>) -> Self {
        Self::Validation {
            message: "Bad Request".to_string(),
            errors,
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            message: "Unauthorized".to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal {
            message: "Internal Server Error".to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, errors) = match self {
            AppError::Validation { message, errors } => (message, Some(errors)),
            AppError::Unauthorized { message }
            | AppError::NotFound { message }
            | AppError::Conflict { message }
            | AppError::Internal { message } => (message, None),
        };

        let body = ErrorBody {
            code: status.as_u16(),
            status: "error",
            message,
            errors,
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            tracing::warn!(constraint = ?db.constraint(), "Unique constraint violation");
            return AppError::conflict("Unique constraint violation");
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {field}"));
                    FieldError::new(field.to_string(), message)
                })
            })
            .collect();

        // HashMap iteration order is unstable.
        fields.sort_by(|a, b| a.path.cmp(&b.path));
        AppError::bad_request(fields)
    }
}
