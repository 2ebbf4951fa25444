//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, RedirectDispatcher, StatsService};
use crate::config::SiteSettings;
use crate::domain::repositories::LinkStore;

/// Cloneable handle to the services and settings.
///
/// Holds no mutable state of its own; everything that changes lives in the
/// link store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LinkStore>,
    pub dispatcher: Arc<RedirectDispatcher<dyn LinkStore>>,
    pub link_service: Arc<LinkService<dyn LinkStore>>,
    pub stats_service: Arc<StatsService<dyn LinkStore>>,
    pub auth_service: Arc<AuthService>,
    pub settings: Arc<SiteSettings>,
}

impl AppState {
    /// Wires the services around one store handle.
    pub fn new(store: Arc<dyn LinkStore>, settings: SiteSettings, admin_key: &str) -> Self {
        Self {
            dispatcher: Arc::new(RedirectDispatcher::new(store.clone())),
            link_service: Arc::new(LinkService::new(store.clone(), settings.domains.clone())),
            stats_service: Arc::new(StatsService::new(store.clone())),
            auth_service: Arc::new(AuthService::new(admin_key)),
            settings: Arc::new(settings),
            store,
        }
    }
}
