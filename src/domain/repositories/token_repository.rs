//! Repository trait for API token authentication.

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// API token entity.
///
/// Tokens are compared by plain equality. There is no expiry or scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiToken {
    pub id: String,
    pub token: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Repository interface for API token management.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_token.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Returns `true` if a token with exactly this value exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists(&self, token: &str) -> Result<bool, AppError>;

    /// Stores a new API token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the token value already exists.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, token: &str, note: Option<String>) -> Result<ApiToken, AppError>;

    /// Lists all tokens, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<ApiToken>, AppError>;

    /// Deletes a token by id. Returns `Ok(false)` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
