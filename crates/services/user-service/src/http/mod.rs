//! HTTP layer - GraphQL endpoint, GraphiQL UI and health check over axum.

mod health;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
