//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::LinkStore`] trait and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::dispatcher::RedirectDispatcher`] - Bot-vs-human dispatch of short links
//! - [`services::link_service::LinkService`] - Link creation, listing and deletion
//! - [`services::stats_service::StatsService`] - Aggregate totals
//! - [`services::auth_service::AuthService`] - Admin key authentication

pub mod services;
