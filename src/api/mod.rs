//! HTTP layer: short link dispatch and the management API.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication, rate limiting, host routing and tracing
//! - [`routes`] - Management API route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
