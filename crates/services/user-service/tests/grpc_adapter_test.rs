//! gRPC adapter tests over the real service and in-memory adapters.

mod common;

use common::TestContext;
use proto::user::{
    CreateUserRequest, DeleteUserRequest, GetUserRequest, ListUsersRequest, UpdateUserRequest,
};
use proto::UserService as _;
use tonic::{Code, Request};
use user_service_lib::grpc::UserGrpcService;

fn grpc(ctx: &TestContext) -> UserGrpcService {
    UserGrpcService::new(ctx.service.clone())
}

async fn create(grpc: &UserGrpcService, email: &str, name: &str) -> proto::user::User {
    grpc.create_user(Request::new(CreateUserRequest {
        email: email.to_string(),
        name: name.to_string(),
    }))
    .await
    .unwrap()
    .into_inner()
    .user
    .unwrap()
}

#[tokio::test]
async fn test_create_and_get_over_grpc() {
    let ctx = TestContext::new();
    let grpc = grpc(&ctx);

    let created = create(&grpc, "a@x.com", "A").await;
    assert!(chrono::DateTime::parse_from_rfc3339(&created.created_at).is_ok());
    assert_eq!(created.created_at, created.updated_at);

    let fetched = grpc
        .get_user(Request::new(GetUserRequest {
            id: created.id.clone(),
        }))
        .await
        .unwrap()
        .into_inner()
        .user
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_status_codes() {
    let ctx = TestContext::new();
    let grpc = grpc(&ctx);
    create(&grpc, "a@x.com", "A").await;

    let invalid = grpc
        .create_user(Request::new(CreateUserRequest {
            email: String::new(),
            name: "A".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(invalid.code(), Code::InvalidArgument);

    let duplicate = grpc
        .create_user(Request::new(CreateUserRequest {
            email: "a@x.com".to_string(),
            name: "A".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(duplicate.code(), Code::AlreadyExists);

    let missing = grpc
        .get_user(Request::new(GetUserRequest {
            id: "missing".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(missing.code(), Code::NotFound);

    let missing_delete = grpc
        .delete_user(Request::new(DeleteUserRequest {
            id: "missing".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(missing_delete.code(), Code::NotFound);
}

#[tokio::test]
async fn test_update_and_list_over_grpc() {
    let ctx = TestContext::new();
    let grpc = grpc(&ctx);
    let created = create(&grpc, "a@x.com", "A").await;
    create(&grpc, "b@x.com", "B").await;

    let updated = grpc
        .update_user(Request::new(UpdateUserRequest {
            id: created.id.clone(),
            email: None,
            name: Some("Renamed".to_string()),
        }))
        .await
        .unwrap()
        .into_inner()
        .user
        .unwrap();
    assert_eq!(updated.email, "a@x.com");
    assert_eq!(updated.name, "Renamed");

    // Zero limit falls back to the default page size
    let listed = grpc
        .list_users(Request::new(ListUsersRequest { limit: 0, offset: 0 }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(listed.users.len(), 2);
}
