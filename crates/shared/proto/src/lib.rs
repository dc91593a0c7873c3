//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated gRPC service definitions for
//! UserService: user management (create, get, list, update, delete).

/// User service definitions.
pub mod user {
    tonic::include_proto!("user");
}

// Re-export commonly used items
pub use user::user_service_server::{UserService, UserServiceServer};
