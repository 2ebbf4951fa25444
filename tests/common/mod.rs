#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use linkpeek::config::{RedirectStrategy, SiteSettings};
use linkpeek::domain::entities::{LinkRecord, NewLink};
use linkpeek::domain::repositories::LinkStore;
use linkpeek::infrastructure::store::MemoryLinkStore;
use linkpeek::routes::build_router;
use linkpeek::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;

pub const ADMIN_KEY: &str = "test-admin-key";
pub const DOMAIN: &str = "lnk.example";

pub const BROWSER_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
pub const FACEBOOK_UA: &str =
    "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)";

pub fn bearer() -> String {
    format!("Bearer {ADMIN_KEY}")
}

pub fn settings(redirect: RedirectStrategy) -> SiteSettings {
    SiteSettings {
        domains: vec![DOMAIN.to_string(), "go.example.com".to_string()],
        redirect,
        preview_cache_seconds: 3600,
    }
}

/// A test server over the full router, backed by an in-memory store.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryLinkStore>,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(RedirectStrategy::Http)
}

pub fn spawn_app_with(redirect: RedirectStrategy) -> TestApp {
    let store = Arc::new(MemoryLinkStore::new());
    let dyn_store: Arc<dyn LinkStore> = store.clone();

    let state = AppState::new(dyn_store, settings(redirect), ADMIN_KEY);
    let app = build_router(state).layer(MockConnectInfoLayer);

    TestApp {
        server: TestServer::new(app).unwrap(),
        store,
    }
}

pub fn link(code: &str, target_url: &str) -> LinkRecord {
    LinkRecord::new(
        NewLink {
            code: code.to_string(),
            target_url: target_url.to_string(),
            domain: Some(DOMAIN.to_string()),
            ..Default::default()
        },
        Utc::now(),
    )
}

/// The `promo1` link with full preview metadata.
pub fn promo1() -> LinkRecord {
    LinkRecord::new(
        NewLink {
            code: "promo1".to_string(),
            target_url: "https://example.com/landing".to_string(),
            title: Some("Spring Sale".to_string()),
            description: Some("50% off".to_string()),
            image_url: Some("https://example.com/img.jpg".to_string()),
            domain: Some(DOMAIN.to_string()),
        },
        Utc::now(),
    )
}

pub async fn seed(store: &MemoryLinkStore, record: &LinkRecord) {
    store.put(&record.code, record).await.unwrap();
}

pub async fn seed_created_at(store: &MemoryLinkStore, code: &str, created_at: DateTime<Utc>) {
    let mut record = link(code, "https://example.com");
    record.created_at = created_at;
    seed(store, &record).await;
}

pub async fn visit_count(store: &MemoryLinkStore, code: &str) -> u64 {
    store.get(code).await.unwrap().unwrap().visit_count
}

/// Polls until background counter updates bring `code` to `expected`.
pub async fn wait_for_visits(store: &MemoryLinkStore, code: &str, expected: u64) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while visit_count(store, code).await < expected {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("visit counter did not settle");
}

/// Inserts a fixed peer address so the per-IP rate limiter has a key.
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
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
