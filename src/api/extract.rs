//! Request extractors that report failures in the error envelope.
//!
//! axum's own rejections answer with plain text. These wrappers turn them
//! into [`AppError::Validation`] with a single field error whose path names
//! the failing request part (`body` or `query`).

use axum::{
    Form, Json,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Query, Request},
    http::{header, request::Parts},
};
use serde::de::DeserializeOwned;
use std::net::SocketAddr;
use validator::Validate;

use crate::error::{AppError, FieldError};

/// A JSON or urlencoded body that passed its `validator` rules.
///
/// The decoder is chosen by `Content-Type`: form bodies for
/// `application/x-www-form-urlencoded`, JSON for everything else.
#[derive(Debug)]
pub struct ValidatedBody<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let value = if is_form {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(v)| v)
                .map_err(|e| body_error(e.body_text()))?
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(v)| v)
                .map_err(|e| body_error(e.body_text()))?
        };

        value.validate()?;
        Ok(Self(value))
    }
}

fn body_error(message: String) -> AppError {
    tracing::debug!(%message, "Rejected request body");
    AppError::bad_request(vec![FieldError::new("body", message)])
}

/// Query string parameters.
///
/// Unknown parameters are ignored by the target type.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request(vec![FieldError::new("query", e.body_text())]))?;

        Ok(Self(value))
    }
}

/// Transport peer address, when the server was started with connect info.
#[derive(Debug, Clone, Copy)]
pub struct PeerAddr(pub Option<SocketAddr>);

impl<S> FromRequestParts<S> for PeerAddr
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr),
        ))
    }
}
