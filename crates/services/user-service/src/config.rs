//! User service configuration.

use std::env;

use common::{parse_or, string_or, CacheConfig, ConfigError, DatabaseConfig, ServerConfig};

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// gRPC and HTTP listeners
    pub server: ServerConfig,
    /// PostgreSQL connection
    pub database: DatabaseConfig,
    /// Redis connection
    pub cache: CacheConfig,
    /// Apply pending migrations before serving
    pub auto_migrate: bool,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset or empty variables take their documented defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig::default();
        let database = DatabaseConfig::default();
        let cache = CacheConfig::default();

        Ok(Self {
            server: ServerConfig {
                host: string_or(&lookup, "SERVER_HOST", &server.host),
                http_port: parse_or(&lookup, "HTTP_PORT", server.http_port)?,
                grpc_port: parse_or(&lookup, "GRPC_PORT", server.grpc_port)?,
                request_timeout_secs: parse_or(
                    &lookup,
                    "REQUEST_TIMEOUT_SECS",
                    server.request_timeout_secs,
                )?,
            },
            database: DatabaseConfig {
                host: string_or(&lookup, "DB_HOST", &database.host),
                port: parse_or(&lookup, "DB_PORT", database.port)?,
                user: string_or(&lookup, "DB_USER", &database.user),
                password: string_or(&lookup, "DB_PASSWORD", &database.password),
                name: string_or(&lookup, "DB_NAME", &database.name),
                ssl_mode: string_or(&lookup, "DB_SSLMODE", &database.ssl_mode),
                max_connections: parse_or(
                    &lookup,
                    "DB_MAX_CONNECTIONS",
                    database.max_connections,
                )?,
                min_connections: parse_or(
                    &lookup,
                    "DB_MIN_CONNECTIONS",
                    database.min_connections,
                )?,
            },
            cache: CacheConfig {
                host: string_or(&lookup, "REDIS_HOST", &cache.host),
                port: parse_or(&lookup, "REDIS_PORT", cache.port)?,
                password: string_or(&lookup, "REDIS_PASSWORD", &cache.password),
                db: parse_or(&lookup, "REDIS_DB", cache.db)?,
            },
            auto_migrate: parse_or(&lookup, "DB_AUTO_MIGRATE", false)?,
        })
    }
}
