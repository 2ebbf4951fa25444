//! Business logic services for the application layer.

pub mod auth_service;
pub mod dispatcher;
pub mod link_service;
pub mod stats_service;

pub use auth_service::AuthService;
pub use dispatcher::{Dispatch, RedirectDispatcher};
pub use link_service::{CreateLink, LinkService};
pub use stats_service::{LinkTotals, StatsService};
