//! Cache layer - ephemeral key/value storage.

mod redis_cache;

pub use redis_cache::{CacheRepository, RedisCache};

#[cfg(any(test, feature = "test-utils"))]
pub use redis_cache::MockCacheRepository;
