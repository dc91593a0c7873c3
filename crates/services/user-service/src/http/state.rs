//! Shared state for HTTP handlers.

use std::sync::Arc;

use crate::cache::CacheRepository;
use crate::graphql::UserSchema;
use crate::infra::Database;

/// Application state handed to every route.
#[derive(Clone)]
pub struct AppState {
    /// GraphQL schema with the user service attached
    pub schema: UserSchema,
    /// Database handle, used for health checks
    pub database: Database,
    /// Cache port, used for health checks
    pub cache: Arc<dyn CacheRepository>,
}

impl AppState {
    pub fn new(schema: UserSchema, database: Database, cache: Arc<dyn CacheRepository>) -> Self {
        Self {
            schema,
            database,
            cache,
        }
    }
}
