//! Core domain entities.
//!
//! - [`LinkRecord`] - a shortened link with preview metadata and visit count
//! - [`NewLink`] - input for creating a record

pub mod link;

pub use link::{LinkRecord, NewLink, RecordError};
