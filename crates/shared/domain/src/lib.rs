//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Both protocol adapters (gRPC and GraphQL) map onto the types defined here.

pub mod constants;
pub mod error;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::{timestamp_now, CreateUserInput, UpdateUserInput, User};
