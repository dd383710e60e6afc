//! Link management service.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkUpdate, LinkWithClicks, NewLink};
use crate::domain::listing::LinkQuery;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Service for creating, listing, updating and deleting links.
///
/// Alias uniqueness is checked before every write so the common case gets a
/// clear conflict. The storage unique constraint still decides races.
pub struct LinkService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(repository: Arc<L>) -> Self {
        Self { repository }
    }

    /// Lists all links with click counts, optionally embedding clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list(
        &self,
        query: LinkQuery,
        with_clicks: bool,
    ) -> Result<Vec<LinkWithClicks>, AppError> {
        self.repository.list(query, with_clicks).await
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get(&self, id: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))
    }

    /// Creates a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the alias is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(&self, name: String, alias: String, url: String) -> Result<Link, AppError> {
        if self.repository.find_by_alias(&alias).await?.is_some() {
            return Err(AppError::conflict("Alias already taken"));
        }

        let link = self
            .repository
            .create(NewLink::new(name, alias, url))
            .await?;

        tracing::info!(id = %link.id, alias = %link.alias, "Link created");
        Ok(link)
    }

    /// Replaces name, alias and url of a link.
    ///
    /// Keeping the link's own alias is not a conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Conflict`] if the alias belongs to another link.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update(&self, id: &str, update: LinkUpdate) -> Result<Link, AppError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found("Link not found"));
        }

        if let Some(owner) = self.repository.find_by_alias(&update.alias).await?
            && owner.id != id
        {
            return Err(AppError::conflict("Alias already taken"));
        }

        let link = self
            .repository
            .update(id, update)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;

        tracing::info!(id = %link.id, alias = %link.alias, "Link updated");
        Ok(link)
    }

    /// Deletes a link together with its clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Link not found"));
        }

        tracing::info!(id, "Link deleted");
        Ok(())
    }

    /// Deletes several links at once.
    ///
    /// Duplicate ids are collapsed before deleting. If any id does not
    /// resolve nothing is deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if any id does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_many(&self, mut ids: Vec<String>) -> Result<u64, AppError> {
        let mut seen = HashSet::with_capacity(ids.len());
        ids.retain(|id| seen.insert(id.clone()));

        let deleted = self.repository.delete_many(ids).await?;

        tracing::info!(deleted, "Links deleted");
        Ok(deleted)
    }

    /// Counts all links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn create_test_link(id: &str, alias: &str) -> Link {
        Link {
            id: id.to_string(),
            name: "Test".to_string(),
            alias: alias.to_string(),
            url: "https://example.com".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn update_to(alias: &str) -> LinkUpdate {
        LinkUpdate {
            name: "Renamed".to_string(),
            alias: alias.to_string(),
            url: "https://example.org".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_alias()
            .withf(|alias| alias == "test-1")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.alias == "test-1" && new_link.url == "https://example.com")
            .times(1)
            .returning(|new_link| Ok(create_test_link(&new_link.id, &new_link.alias)));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service
            .create(
                "Test".to_string(),
                "test-1".to_string(),
                "https://example.com".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(link.alias, "test-1");
    }

    #[tokio::test]
    async fn test_create_taken_alias_is_conflict() {
        let mut mock_repo = MockLinkRepository::new();

        let existing = create_test_link("a1", "taken");
        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_create().never();

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .create(
                "Test".to_string(),
                "taken".to_string(),
                "https://example.com".to_string(),
            )
            .await;

        match result.unwrap_err() {
            AppError::Conflict { message } => assert_eq!(message, "Alias already taken"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.get("missing").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_keeps_own_alias() {
        let mut mock_repo = MockLinkRepository::new();

        let current = create_test_link("a1", "mine");
        let owner = current.clone();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(current.clone())));
        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(move |_| Ok(Some(owner.clone())));
        mock_repo
            .expect_update()
            .withf(|id, update| id == "a1" && update.alias == "mine")
            .times(1)
            .returning(|id, update| {
                let mut link = create_test_link(id, &update.alias);
                link.name = update.name;
                Ok(Some(link))
            });

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service.update("a1", update_to("mine")).await.unwrap();

        assert_eq!(link.name, "Renamed");
    }

    #[tokio::test]
    async fn test_update_alias_of_other_link_is_conflict() {
        let mut mock_repo = MockLinkRepository::new();

        let current = create_test_link("a1", "mine");
        let other = create_test_link("b2", "theirs");
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(current.clone())));
        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(move |_| Ok(Some(other.clone())));
        mock_repo.expect_update().never();

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.update("a1", update_to("theirs")).await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_link_is_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_find_by_alias().never();

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.update("missing", update_to("any")).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_link_is_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = LinkService::new(Arc::new(mock_repo));

        assert!(matches!(
            service.delete("missing").await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_many_collapses_duplicates() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_delete_many()
            .withf(|ids| ids == &vec!["a".to_string(), "b".to_string()])
            .times(1)
            .returning(|ids| Ok(ids.len() as u64));

        let service = LinkService::new(Arc::new(mock_repo));

        let deleted = service
            .delete_many(vec!["a".to_string(), "b".to_string(), "a".to_string()])
            .await
            .unwrap();

        assert_eq!(deleted, 2);
    }

    #[tokio::test]
    async fn test_delete_many_keeps_first_seen_order() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_delete_many()
            .withf(|ids| ids == &vec!["c".to_string(), "a".to_string(), "b".to_string()])
            .times(1)
            .returning(|ids| Ok(ids.len() as u64));

        let service = LinkService::new(Arc::new(mock_repo));

        let mut ids = vec!["c".to_string(), "a".to_string()];
        ids.extend(std::iter::repeat_n("a".to_string(), 200_000));
        ids.extend(["b".to_string(), "c".to_string()]);

        let deleted = service.delete_many(ids).await.unwrap();

        assert_eq!(deleted, 3);
    }
}
