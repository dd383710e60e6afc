//! Repository trait for link data access.

use crate::domain::entities::{Link, LinkUpdate, LinkWithClicks, NewLink};
use crate::domain::listing::LinkQuery;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] with `"Alias already taken"` if the
    /// alias is already in use.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its alias. Matching is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError>;

    /// Lists all links with their click counts.
    ///
    /// Rows are ordered by the query's sort field, then by id ascending.
    /// When `include_clicks` is set each entry also carries its click
    /// records ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(
        &self,
        query: LinkQuery,
        include_clicks: bool,
    ) -> Result<Vec<LinkWithClicks>, AppError>;

    /// Replaces name, alias and url of a link and refreshes `updated_at`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with the updated record
    /// - `Ok(None)` if no link has this id
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new alias belongs to another link.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: &str, update: LinkUpdate) -> Result<Option<Link>, AppError>;

    /// Deletes a link and, through the cascade, its clicks.
    ///
    /// Returns `Ok(false)` if no link has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// Deletes every link in `ids` atomically.
    ///
    /// `ids` must not contain duplicates. Either all links are removed or,
    /// if any id does not resolve, none are.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if any id does not exist.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_many(&self, ids: Vec<String>) -> Result<u64, AppError>;

    /// Counts all links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
