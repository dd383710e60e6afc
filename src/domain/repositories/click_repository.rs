//! Repository trait for click recording and listing.

use crate::domain::entities::{Click, ClickWithLink, NewClick};
use crate::domain::listing::ClickQuery;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click events.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including a
    /// `link_id` that no longer exists.
    async fn create(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Lists clicks ordered by the query's sort field, then id.
    ///
    /// Null values sort last ascending and first descending. At most
    /// `query.limit` rows are returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(
        &self,
        query: ClickQuery,
        include_link: bool,
    ) -> Result<Vec<ClickWithLink>, AppError>;

    /// Deletes a click. Returns `Ok(false)` if no click has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// Counts clicks across all links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
