//! Click listing and deletion service.

use std::sync::Arc;

use crate::domain::entities::ClickWithLink;
use crate::domain::listing::ClickQuery;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// Service for reading and pruning recorded clicks.
pub struct ClickService<C: ClickRepository + ?Sized = dyn ClickRepository> {
    repository: Arc<C>,
}

impl<C: ClickRepository + ?Sized> ClickService<C> {
    /// Creates a new click service.
    pub fn new(repository: Arc<C>) -> Self {
        Self { repository }
    }

    /// Lists clicks, optionally embedding each parent link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list(
        &self,
        query: ClickQuery,
        with_links: bool,
    ) -> Result<Vec<ClickWithLink>, AppError> {
        self.repository.list(query, with_links).await
    }

    /// Deletes a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no click has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Click not found"));
        }

        tracing::info!(id, "Click deleted");
        Ok(())
    }

    /// Counts clicks across all links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
