//! User domain entity and related types.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Current time truncated to microseconds, the precision PostgreSQL stores.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user; both timestamps are set to the same instant.
    pub fn new(id: String, email: String, name: String) -> Self {
        let now = timestamp_now();
        Self {
            id,
            email,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields present in `input` and refresh `updated_at`.
    pub fn apply(&mut self, input: &UpdateUserInput) {
        if let Some(email) = &input.email {
            self.email = email.clone();
        }
        if let Some(name) = &input.name {
            self.name = name.clone();
        }
        self.updated_at = timestamp_now().max(self.updated_at);
    }
}

/// User creation value object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserInput {
    /// User email address
    pub email: String,
    /// User display name
    pub name: String,
}

impl CreateUserInput {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// Partial update; `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateUserInput {
    /// New email address
    pub email: Option<String>,
    /// New display name
    pub name: Option<String>,
}
