//! GraphQL layer - async-graphql schema over the user service.

mod resolver;
mod types;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use crate::service::UserService;

pub use resolver::{MutationRoot, QueryRoot};
pub use types::{CreateUserInputObject, UpdateUserInputObject, UserObject};

/// The user GraphQL schema
pub type UserSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the user service available to every resolver.
pub fn build_schema(service: Arc<dyn UserService>) -> UserSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}
