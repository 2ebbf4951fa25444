//! Bot-vs-human dispatch for short link requests.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::agent::AgentClass;
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::LinkStore;
use crate::domain::visit_counter::VisitCounter;
use crate::error::AppError;

/// What to send back for a resolved short link.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Metadata page for a preview crawler.
    Preview(LinkRecord),
    /// Navigation to the target for everyone else.
    Navigate(LinkRecord),
}

impl Dispatch {
    pub fn record(&self) -> &LinkRecord {
        match self {
            Dispatch::Preview(record) | Dispatch::Navigate(record) => record,
        }
    }

    pub fn agent(&self) -> AgentClass {
        match self {
            Dispatch::Preview(_) => AgentClass::Bot,
            Dispatch::Navigate(_) => AgentClass::Human,
        }
    }
}

/// Resolves short codes and decides how each request is answered.
///
/// Every dispatch that finds a record schedules exactly one visit increment
/// through [`VisitCounter::schedule`] and returns without waiting for it.
pub struct RedirectDispatcher<S: LinkStore + ?Sized> {
    store: Arc<S>,
    visits: VisitCounter<S>,
}

impl<S: LinkStore + ?Sized + 'static> RedirectDispatcher<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            visits: VisitCounter::new(store.clone()),
            store,
        }
    }

    /// Looks up `code` and classifies `user_agent`.
    ///
    /// Codes are matched lower-cased, the form they are created in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] (details carry the code) when no record
    /// exists, in which case no visit is counted. Store failures become
    /// [`AppError::StoreUnavailable`] without being retried.
    pub async fn dispatch(&self, code: &str, user_agent: &str) -> Result<Dispatch, AppError> {
        let code = code.to_ascii_lowercase();

        let record = self.store.get(&code).await?.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })?;

        let agent = AgentClass::classify(user_agent);
        metrics::counter!("linkpeek_dispatch_total", "agent" => agent.as_str()).increment(1);
        debug!(code = %code, agent = agent.as_str(), "Dispatching short link");

        self.visits.schedule(&code);

        Ok(match agent {
            AgentClass::Bot => Dispatch::Preview(record),
            AgentClass::Human => Dispatch::Navigate(record),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::Utc;

    use crate::domain::entities::NewLink;
    use crate::domain::repositories::{MockLinkStore, StoreError};
    use crate::infrastructure::store::MemoryLinkStore;

    const BROWSER_UA: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36";

    fn promo1() -> LinkRecord {
        LinkRecord::new(
            NewLink {
                code: "promo1".to_string(),
                target_url: "https://example.com/landing".to_string(),
                title: Some("Spring Sale".to_string()),
                ..Default::default()
            },
            Utc::now(),
        )
    }

    async fn visit_count(store: &MemoryLinkStore, code: &str) -> u64 {
        store.get(code).await.unwrap().unwrap().visit_count
    }

    /// Polls until the detached counter tasks have brought `code` to `expected`.
    async fn wait_for_visits(store: &MemoryLinkStore, code: &str, expected: u64) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while visit_count(store, code).await < expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("visit counter did not settle");
    }

    #[tokio::test]
    async fn test_bot_gets_preview() {
        let mut mock_store = MockLinkStore::new();
        mock_store.expect_get().returning(|_| Ok(Some(promo1())));
        mock_store.expect_put().returning(|_, _| Ok(()));

        let dispatcher = RedirectDispatcher::new(Arc::new(mock_store));
        let dispatch = dispatcher
            .dispatch("promo1", "facebookexternalhit/1.1")
            .await
            .unwrap();

        assert!(matches!(dispatch, Dispatch::Preview(_)));
        assert_eq!(dispatch.agent(), AgentClass::Bot);
        assert_eq!(dispatch.record().code, "promo1");
    }

    #[tokio::test]
    async fn test_browser_and_empty_agent_navigate() {
        let mut mock_store = MockLinkStore::new();
        mock_store.expect_get().returning(|_| Ok(Some(promo1())));
        mock_store.expect_put().returning(|_, _| Ok(()));

        let dispatcher = RedirectDispatcher::new(Arc::new(mock_store));

        for ua in [BROWSER_UA, ""] {
            let dispatch = dispatcher.dispatch("promo1", ua).await.unwrap();
            assert!(matches!(dispatch, Dispatch::Navigate(_)), "{ua:?}");
        }
    }

    #[tokio::test]
    async fn test_unknown_code_schedules_nothing() {
        let mut mock_store = MockLinkStore::new();
        mock_store
            .expect_get()
            .withf(|code| code == "doesnotexist")
            .times(1)
            .returning(|_| Ok(None));
        mock_store.expect_put().times(0);

        let dispatcher = RedirectDispatcher::new(Arc::new(mock_store));
        let err = dispatcher
            .dispatch("doesnotexist", BROWSER_UA)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_error_info().details, json!({ "code": "doesnotexist" }));
    }

    #[tokio::test]
    async fn test_store_failure_is_unavailable() {
        let mut mock_store = MockLinkStore::new();
        mock_store
            .expect_get()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection refused".to_string())));
        mock_store.expect_put().times(0);

        let dispatcher = RedirectDispatcher::new(Arc::new(mock_store));
        let err = dispatcher.dispatch("promo1", BROWSER_UA).await.unwrap_err();

        assert!(matches!(err, AppError::StoreUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_code_is_matched_lowercase() {
        let mut mock_store = MockLinkStore::new();
        mock_store
            .expect_get()
            .withf(|code| code == "promo1")
            .returning(|_| Ok(Some(promo1())));
        mock_store.expect_put().returning(|_, _| Ok(()));

        let dispatcher = RedirectDispatcher::new(Arc::new(mock_store));
        assert!(dispatcher.dispatch("PROMO1", BROWSER_UA).await.is_ok());
    }

    #[tokio::test]
    async fn test_sequential_dispatches_count_every_visit() {
        let store = Arc::new(MemoryLinkStore::new());
        store.put("promo1", &promo1()).await.unwrap();
        let dispatcher = RedirectDispatcher::new(store.clone());

        for i in 1..=10u64 {
            let ua = if i % 2 == 0 { "Twitterbot/1.0" } else { BROWSER_UA };
            dispatcher.dispatch("promo1", ua).await.unwrap();
            wait_for_visits(&store, "promo1", i).await;
        }

        let record = store.get("promo1").await.unwrap().unwrap();
        assert_eq!(record.visit_count, 10);
        assert!(record.last_visited_at.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_dispatches_count_at_least_one() {
        const CONCURRENT: u64 = 50;

        let store = Arc::new(MemoryLinkStore::new());
        store.put("promo1", &promo1()).await.unwrap();
        let dispatcher = Arc::new(RedirectDispatcher::new(store.clone()));

        let handles: Vec<_> = (0..CONCURRENT)
            .map(|_| {
                let dispatcher = dispatcher.clone();
                tokio::spawn(async move { dispatcher.dispatch("promo1", BROWSER_UA).await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        wait_for_visits(&store, "promo1", 1).await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        let count = visit_count(&store, "promo1").await;
        assert!((1..=CONCURRENT).contains(&count), "count = {count}");
    }

    #[tokio::test]
    async fn test_repeated_bot_dispatches_see_same_metadata() {
        let store = Arc::new(MemoryLinkStore::new());
        store.put("promo1", &promo1()).await.unwrap();
        let dispatcher = RedirectDispatcher::new(store.clone());

        let first = dispatcher.dispatch("promo1", "Slackbot 1.0").await.unwrap();
        wait_for_visits(&store, "promo1", 1).await;
        let second = dispatcher.dispatch("promo1", "Slackbot 1.0").await.unwrap();

        let (a, b) = (first.record(), second.record());
        assert_eq!(a.title, b.title);
        assert_eq!(a.description, b.description);
        assert_eq!(a.image_url, b.image_url);
        assert_eq!(a.target_url, b.target_url);
    }
}
