//! gRPC layer - tonic adapter over the user service.

mod user_grpc;

pub use user_grpc::UserGrpcService;
