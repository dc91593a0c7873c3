//! Query and mutation resolvers.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use super::types::{CreateUserInputObject, UpdateUserInputObject, UserObject};
use crate::service::UserService;
use common::AppError;
use domain::{DomainError, DEFAULT_LIST_LIMIT, DEFAULT_LIST_OFFSET};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Fetch a single user by ID
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<UserObject> {
        let user = user_service(ctx)?
            .get_user(id.as_str())
            .await
            .map_err(to_graphql_error)?;
        Ok(user.into())
    }

    /// List users with limit/offset pagination
    async fn users(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> Result<Vec<UserObject>> {
        let limit = limit.map_or(DEFAULT_LIST_LIMIT, i64::from);
        let offset = offset.map_or(DEFAULT_LIST_OFFSET, i64::from);

        let users = user_service(ctx)?
            .list_users(limit, offset)
            .await
            .map_err(to_graphql_error)?;
        Ok(users.into_iter().map(UserObject::from).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new user
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        input: CreateUserInputObject,
    ) -> Result<UserObject> {
        let user = user_service(ctx)?
            .create_user(input.into())
            .await
            .map_err(to_graphql_error)?;
        Ok(user.into())
    }

    /// Update an existing user
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateUserInputObject,
    ) -> Result<UserObject> {
        let user = user_service(ctx)?
            .update_user(id.as_str(), input.into())
            .await
            .map_err(to_graphql_error)?;
        Ok(user.into())
    }

    /// Delete a user
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        user_service(ctx)?
            .delete_user(id.as_str())
            .await
            .map_err(to_graphql_error)?;
        Ok(true)
    }
}

fn user_service<'a>(ctx: &Context<'a>) -> Result<&'a Arc<dyn UserService>> {
    ctx.data::<Arc<dyn UserService>>()
}

/// Map a domain error to a GraphQL error carrying `extensions.code`.
fn to_graphql_error(err: DomainError) -> async_graphql::Error {
    AppError::from(err).extend()
}
