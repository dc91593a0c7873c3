//! GraphQL object and input types.

use async_graphql::{InputObject, SimpleObject, ID};

use domain::{CreateUserInput, UpdateUserInput, User};

/// A registered user
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "User")]
pub struct UserObject {
    pub id: ID,
    pub email: String,
    pub name: String,
    /// RFC3339 creation time
    pub created_at: String,
    /// RFC3339 time of the last change
    pub updated_at: String,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: ID(user.id),
            email: user.email,
            name: user.name,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

#[derive(InputObject, Debug)]
#[graphql(name = "CreateUserInput")]
pub struct CreateUserInputObject {
    pub email: String,
    pub name: String,
}

impl From<CreateUserInputObject> for CreateUserInput {
    fn from(input: CreateUserInputObject) -> Self {
        CreateUserInput::new(input.email, input.name)
    }
}

/// Fields left out keep their stored value
#[derive(InputObject, Debug)]
#[graphql(name = "UpdateUserInput")]
pub struct UpdateUserInputObject {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<UpdateUserInputObject> for UpdateUserInput {
    fn from(input: UpdateUserInputObject) -> Self {
        UpdateUserInput {
            email: input.email,
            name: input.name,
        }
    }
}
