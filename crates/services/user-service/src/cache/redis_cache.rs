//! Cache port and its Redis implementation.
//!
//! Values are opaque strings; callers pick their own encoding. A TTL of
//! `None` or zero stores the key without expiration.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};

use common::{AppError, CacheConfig};
use domain::{DomainError, DomainResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cache trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CacheRepository: Send + Sync {
    /// Store a value, optionally expiring after `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> DomainResult<()>;

    /// Get a value; `None` on miss
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Remove a value
    async fn delete(&self, key: &str) -> DomainResult<()>;

    /// Check whether a key is present
    async fn exists(&self, key: &str) -> DomainResult<bool>;
}

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    /// Connect to Redis and verify the connection with PING.
    pub async fn connect(config: &CacheConfig) -> Result<Self, RedisError> {
        tracing::debug!("Connecting to Redis at {}:{}", config.host, config.port);
        let client = Client::open(config.connection_info())?;
        let mut connection = ConnectionManager::new(client).await?;

        let _: String = redis::cmd("PING").query_async(&mut connection).await?;
        tracing::info!("Redis cache connected");

        Ok(Self { connection })
    }
}

#[async_trait]
impl CacheRepository for RedisCache {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> DomainResult<()> {
        let mut conn = self.connection.clone();

        match ttl_millis(ttl) {
            Some(millis) => conn
                .pset_ex::<_, _, ()>(key, value, millis)
                .await
                .map_err(cache_error)?,
            None => conn.set::<_, _, ()>(key, value).await.map_err(cache_error)?,
        }

        Ok(())
    }

    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> DomainResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> DomainResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(cache_error)?;
        Ok(exists)
    }
}

/// Expiration in milliseconds, or `None` for keys that never expire.
fn ttl_millis(ttl: Option<Duration>) -> Option<u64> {
    match ttl {
        Some(ttl) if !ttl.is_zero() => {
            let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
            Some(millis.max(1))
        }
        _ => None,
    }
}

/// Convert Redis error to the domain taxonomy.
fn cache_error(e: RedisError) -> DomainError {
    DomainError::from(AppError::from(e))
}
