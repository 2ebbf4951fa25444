//! Server-rendered HTML for the redirect path.
//!
//! - [`pages`] - Askama templates for link, not-found and error pages

pub mod pages;
