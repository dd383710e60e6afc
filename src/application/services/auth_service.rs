//! Authentication service for API token validation.

use std::sync::Arc;

use crate::domain::repositories::TokenRepository;
use crate::error::AppError;

/// Note stored with the token seeded from the environment.
pub const SEED_TOKEN_NOTE: &str = "Main token for the application to access the API";

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are an allow-list compared by exact equality.
pub struct AuthService<R: TokenRepository + ?Sized = dyn TokenRepository> {
    repository: Arc<R>,
}

impl<R: TokenRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Authenticates a raw bearer token.
    ///
    /// An empty token is rejected without a storage lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is empty or unknown.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<(), AppError> {
        if token.is_empty() {
            return Err(AppError::unauthorized());
        }

        if !self.repository.exists(token).await? {
            tracing::debug!("Rejected unknown API token");
            return Err(AppError::unauthorized());
        }

        Ok(())
    }

    /// Stores `token` with [`SEED_TOKEN_NOTE`] unless it already exists.
    ///
    /// Returns `true` if a token was inserted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn ensure_token(&self, token: &str) -> Result<bool, AppError> {
        if self.repository.exists(token).await? {
            return Ok(false);
        }

        self.repository
            .create(token, Some(SEED_TOKEN_NOTE.to_string()))
            .await?;

        Ok(true)
    }
}
