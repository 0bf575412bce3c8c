//! Caching infrastructure for the service layer.
//!
//! A cache abstraction with a Redis implementation and an in-process map
//! used for local runs and tests. Callers treat every cache failure as a miss.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
#[cfg(any(test, feature = "mock"))]
pub use cache_interface::MockCacheInterface;
pub use memory_cache::InMemoryCache;
pub use redis_cache::{create_redis_pool, RedisCacheService};
