//! In-memory adapters shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use domain::{DomainError, DomainResult, UpdateUserInput, User};
use user_service_lib::cache::CacheRepository;
use user_service_lib::repository::UserRepository;
use user_service_lib::service::{UserManager, UserService};

/// HashMap-backed repository that counts write calls.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
    creates: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> DomainResult<()> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::internal("unique violation on email"));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> DomainResult<Vec<User>> {
        let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        users.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(users
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn update(&self, id: &str, input: &UpdateUserInput) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(id).ok_or(DomainError::NotFound)?;
        user.apply(input);
        Ok(user.clone())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.users.lock().unwrap().remove(id);
        Ok(())
    }
}

/// Cache that stores nothing and counts every call.
#[derive(Default)]
pub struct NoopCache {
    calls: AtomicUsize,
}

impl NoopCache {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheRepository for NoopCache {
    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get(&self, _key: &str) -> DomainResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }

    async fn delete(&self, _key: &str) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn exists(&self, _key: &str) -> DomainResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }
}

/// A service wired to fresh in-memory adapters.
pub struct TestContext {
    pub repo: Arc<InMemoryUserRepository>,
    pub cache: Arc<NoopCache>,
    pub service: Arc<dyn UserService>,
}

impl TestContext {
    pub fn new() -> Self {
        let repo = Arc::new(InMemoryUserRepository::default());
        let cache = Arc::new(NoopCache::default());
        let service: Arc<dyn UserService> = Arc::new(UserManager::new(
            Arc::clone(&repo) as Arc<dyn UserRepository>,
            Arc::clone(&cache) as Arc<dyn CacheRepository>,
        ));
        Self {
            repo,
            cache,
            service,
        }
    }
}
