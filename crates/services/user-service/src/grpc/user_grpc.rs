//! gRPC implementation for UserService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::service::UserService;
use common::AppError;
use domain::{CreateUserInput, DomainError, UpdateUserInput, DEFAULT_LIST_LIMIT};
use proto::user::{
    user_service_server::UserService as UserServiceProto, CreateUserRequest, DeleteUserRequest,
    DeleteUserResponse, GetUserRequest, ListUsersRequest, ListUsersResponse, UpdateUserRequest,
    User as ProtoUser, UserResponse,
};

/// gRPC service wrapper for UserService.
pub struct UserGrpcService {
    service: Arc<dyn UserService>,
}

impl UserGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let req = request.into_inner();

        let user = self
            .service
            .create_user(CreateUserInput::new(req.email, req.name))
            .await
            .map_err(to_status)?;
        Ok(Response::new(user_response(&user)))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let req = request.into_inner();

        let user = self.service.get_user(&req.id).await.map_err(to_status)?;
        Ok(Response::new(user_response(&user)))
    }

    async fn list_users(
        &self,
        request: Request<ListUsersRequest>,
    ) -> Result<Response<ListUsersResponse>, Status> {
        let req = request.into_inner();
        let limit = match req.limit {
            0 => DEFAULT_LIST_LIMIT,
            limit => i64::from(limit),
        };

        let users = self
            .service
            .list_users(limit, i64::from(req.offset))
            .await
            .map_err(to_status)?;
        let users = users.iter().map(user_to_proto).collect();

        Ok(Response::new(ListUsersResponse { users }))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let req = request.into_inner();
        let input = UpdateUserInput {
            email: req.email,
            name: req.name,
        };

        let user = self
            .service
            .update_user(&req.id, input)
            .await
            .map_err(to_status)?;
        Ok(Response::new(user_response(&user)))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let req = request.into_inner();

        self.service.delete_user(&req.id).await.map_err(to_status)?;
        Ok(Response::new(DeleteUserResponse { success: true }))
    }
}

/// Map a domain error to a gRPC status without leaking internal details.
fn to_status(err: DomainError) -> Status {
    Status::from(AppError::from(err))
}

/// Convert domain User to proto User.
fn user_to_proto(user: &domain::User) -> ProtoUser {
    ProtoUser {
        id: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        created_at: user.created_at.to_rfc3339(),
        updated_at: user.updated_at.to_rfc3339(),
    }
}

fn user_response(user: &domain::User) -> UserResponse {
    UserResponse {
        user: Some(user_to_proto(user)),
    }
}
