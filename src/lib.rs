//! # linkpeek
//!
//! A short link redirector that answers link-preview crawlers and people
//! differently, built with Axum and Redis.
//!
//! Crawlers (Facebook, WhatsApp, Slack, Twitter and friends) receive an HTML
//! page carrying Open Graph and Twitter card metadata. Browsers are sent on
//! to the target URL. Every resolved request bumps a visit counter in the
//! background.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Link records, agent classification, visit counting, store trait
//! - **Application Layer** ([`application`]) - Dispatch and management services
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory link stores
//! - **API Layer** ([`api`]) - Redirect handler, management API, middleware
//! - **Web Layer** ([`web`]) - HTML pages for the redirect path
//!
//! ## Quick Start
//!
//! ```bash
//! export ADMIN_KEY="change-me"
//! export DOMAINS="lnk.example"
//! export REDIS_URL="redis://localhost:6379"  # Optional, in-memory otherwise
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for the admin CLI
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AuthService, CreateLink, Dispatch, LinkService, RedirectDispatcher, StatsService,
    };
    pub use crate::config::{RedirectStrategy, SiteSettings};
    pub use crate::domain::entities::{LinkRecord, NewLink};
    pub use crate::domain::repositories::{LinkStore, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryLinkStore, RedisLinkStore};
    pub use crate::state::AppState;
}
