//! Alias resolution and click recording for redirects.

use std::sync::Arc;

use crate::domain::entities::{Link, NewClick, Visitor};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

/// Service behind the public redirect endpoint.
///
/// # Flow
///
/// 1. Look up the link by alias (exact, case-sensitive)
/// 2. Record one click with the visitor metadata, unless tracking is off
/// 3. Hand the link back so the caller can redirect
///
/// The click is written before returning, so a storage failure surfaces as
/// an error instead of a redirect.
pub struct RedirectService<
    L: LinkRepository + ?Sized = dyn LinkRepository,
    C: ClickRepository + ?Sized = dyn ClickRepository,
> {
    links: Arc<L>,
    clicks: Arc<C>,
}

impl<L: LinkRepository + ?Sized, C: ClickRepository + ?Sized> RedirectService<L, C> {
    /// Creates a new redirect service.
    pub fn new(links: Arc<L>, clicks: Arc<C>) -> Self {
        Self { links, clicks }
    }

    /// Resolves an alias and records the visit.
    ///
    /// Pass `None` as `visitor` to redirect without recording a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this alias.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, alias: &str, visitor: Option<Visitor>) -> Result<Link, AppError> {
        let link = self
            .links
            .find_by_alias(alias)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;

        match visitor {
            Some(visitor) => {
                let click = self
                    .clicks
                    .create(NewClick::new(link.id.clone(), visitor))
                    .await?;
                tracing::debug!(alias, click_id = %click.id, "Click recorded");
            }
            None => tracing::debug!(alias, "Click tracking skipped"),
        }

        Ok(link)
    }
}
