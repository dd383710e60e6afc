#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use bitlie::domain::entities::{Click, Link, NewClick, NewLink, Visitor};
use bitlie::domain::listing::ClickQuery;
use bitlie::domain::repositories::{ClickRepository, LinkRepository};
use bitlie::infrastructure::memory::MemoryStore;
use bitlie::routes::router;
use bitlie::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const TEST_TOKEN: &str = "test-token";

pub const PEER_ADDR: &str = "127.0.0.1:12345";

/// Inserts the peer address `axum::serve` would provide.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// A running app on a fresh memory store, with [`TEST_TOKEN`] registered.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_public_dir("tests/fixtures/public").await
    }

    pub async fn with_public_dir(public_dir: &str) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::memory(store.clone(), public_dir);

        state.auth_service.ensure_token(TEST_TOKEN).await.unwrap();

        let app = router(state).layer(MockConnectInfoLayer);
        let server = TestServer::new(app).unwrap();

        Self { server, store }
    }

    pub async fn create_link(&self, name: &str, alias: &str, url: &str) -> Link {
        LinkRepository::create(self.store.as_ref(), NewLink::new(name.to_string(), alias.to_string(), url.to_string()))
            .await
            .unwrap()
    }

    pub async fn create_click(&self, link_id: &str, visitor: Visitor) -> Click {
        ClickRepository::create(self.store.as_ref(), NewClick::new(link_id.to_string(), visitor))
            .await
            .unwrap()
    }

    /// Every stored click, oldest first.
    pub async fn clicks(&self) -> Vec<Click> {
        ClickRepository::list(self.store.as_ref(), ClickQuery::default(), false)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.click)
            .collect()
    }

    pub async fn link_count(&self) -> i64 {
        LinkRepository::count(self.store.as_ref()).await.unwrap()
    }

    pub async fn click_count(&self) -> i64 {
        ClickRepository::count(self.store.as_ref()).await.unwrap()
    }
}
