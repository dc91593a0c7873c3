//! User service - Handles user-related business logic.
//!
//! Enforces input validation, email uniqueness and existence checks on top of
//! the repository port. Holds no mutable state of its own.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use domain::{CreateUserInput, DomainError, DomainResult, UpdateUserInput, User};

use crate::cache::CacheRepository;
use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a new user with a fresh identifier
    async fn create_user(&self, input: CreateUserInput) -> DomainResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: &str) -> DomainResult<User>;

    /// List users with limit/offset pagination
    async fn list_users(&self, limit: i64, offset: i64) -> DomainResult<Vec<User>>;

    /// Apply a partial update to an existing user
    async fn update_user(&self, id: &str, input: UpdateUserInput) -> DomainResult<User>;

    /// Delete an existing user
    async fn delete_user(&self, id: &str) -> DomainResult<()>;
}

/// Concrete implementation of UserService using repository and cache ports.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repo: Arc<dyn UserRepository>, cache: Arc<dyn CacheRepository>) -> Self {
        Self { repo, cache }
    }

    /// The injected cache. Not consulted by any use case yet.
    pub fn cache(&self) -> &Arc<dyn CacheRepository> {
        &self.cache
    }

    /// Fetch a user, normalizing an absent result to `NotFound`.
    async fn find_existing(&self, id: &str) -> DomainResult<User> {
        self.repo.get_by_id(id).await?.ok_or(DomainError::NotFound)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, input: CreateUserInput) -> DomainResult<User> {
        if input.email.is_empty() {
            return Err(DomainError::invalid_input("email is required"));
        }
        if input.name.is_empty() {
            return Err(DomainError::invalid_input("name is required"));
        }

        // Check-then-create is not atomic: a concurrent create with the same
        // email is rejected by the unique index and surfaces as Internal.
        if self.repo.get_by_email(&input.email).await?.is_some() {
            return Err(DomainError::AlreadyExists);
        }

        let user = User::new(Uuid::new_v4().to_string(), input.email, input.name);
        self.repo.create(&user).await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> DomainResult<User> {
        self.find_existing(id).await
    }

    async fn list_users(&self, limit: i64, offset: i64) -> DomainResult<Vec<User>> {
        self.repo.list(limit, offset).await
    }

    async fn update_user(&self, id: &str, input: UpdateUserInput) -> DomainResult<User> {
        self.find_existing(id).await?;

        let user = self.repo.update(id, &input).await?;
        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> DomainResult<()> {
        self.find_existing(id).await?;

        self.repo.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
