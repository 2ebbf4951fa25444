//! Helpers shared by the services and the HTTP layer.
//!
//! - [`code_generator`] - Short code generation and custom code sanitizing
//! - [`url_validator`] - Target URL validation
//! - [`extract_host`] - `Host` header parsing and subdomain resolution

pub mod code_generator;
pub mod extract_host;
pub mod url_validator;
