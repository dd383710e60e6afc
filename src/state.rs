//! Shared application state injected into every handler.

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{
    AuthService, ClickService, LinkService, RedirectService, StatsService,
};
use crate::domain::repositories::{ClickRepository, LinkRepository, TokenRepository};
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository, PgTokenRepository};

/// Services built once at startup and cloned cheaply per request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub click_service: Arc<ClickService>,
    pub redirect_service: Arc<RedirectService>,
    pub auth_service: Arc<AuthService>,
    pub stats_service: Arc<StatsService>,
    /// Directory served for paths no route matches.
    pub public_dir: PathBuf,
}

impl AppState {
    /// Wires every service on top of the given repositories.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        clicks: Arc<dyn ClickRepository>,
        tokens: Arc<dyn TokenRepository>,
        public_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(links.clone())),
            click_service: Arc::new(ClickService::new(clicks.clone())),
            redirect_service: Arc::new(RedirectService::new(links.clone(), clicks.clone())),
            auth_service: Arc::new(AuthService::new(tokens)),
            stats_service: Arc::new(StatsService::new(links, clicks)),
            public_dir: public_dir.into(),
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>, public_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(PgLinkRepository::new(pool.clone())),
            Arc::new(PgClickRepository::new(pool.clone())),
            Arc::new(PgTokenRepository::new(pool)),
            public_dir,
        )
    }

    /// State backed by a single in-process store.
    pub fn memory(store: Arc<MemoryStore>, public_dir: impl Into<PathBuf>) -> Self {
        Self::new(store.clone(), store.clone(), store, public_dir)
    }
}
