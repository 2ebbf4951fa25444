//! Link store implementations.
//!
//! - [`RedisLinkStore`] - production store backed by Redis
//! - [`MemoryLinkStore`] - in-process store for local runs and tests
//!
//! Both persist the JSON produced by [`codec`] under `link:{code}` keys.

pub mod codec;
mod memory;
mod redis_store;

pub use memory::MemoryLinkStore;
pub use redis_store::RedisLinkStore;
