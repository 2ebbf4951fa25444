//! Domain layer containing business entities and logic.
//!
//! - [`entities`] - Link record data model
//! - [`repositories`] - Storage trait definitions
//! - [`agent`] - Preview-crawler detection from the `User-Agent` header
//! - [`visit_counter`] - Fire-and-forget visit counting
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives a request for a short code
//! 2. [`crate::application::services::RedirectDispatcher`] loads the record
//! 3. [`agent::AgentClass`] decides between preview page and navigation
//! 4. [`visit_counter::VisitCounter::schedule`] bumps the counter in a detached task

pub mod agent;
pub mod entities;
pub mod repositories;
pub mod visit_counter;
