//! User Service Library
//!
//! User management exposed over gRPC and GraphQL. Both transports share one
//! `UserService`, backed by PostgreSQL for storage and Redis for caching.

pub mod cache;
pub mod config;
pub mod graphql;
pub mod grpc;
pub mod http;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::{net::TcpListener, signal, sync::watch};
use tonic::transport::Server;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cache::{CacheRepository, RedisCache};
use crate::config::UserServiceConfig;
use crate::graphql::build_schema;
use crate::grpc::UserGrpcService;
use crate::http::{create_router, AppState};
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

/// Error type returned by the process entry points.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Roll back every applied migration
    Down,
    /// Print the latest applied migration
    Version,
    /// Print every known migration with its applied flag
    Status,
}

/// Run a migration command against the configured database.
pub async fn run_migrations(
    action: MigrateAction,
    config: &UserServiceConfig,
) -> Result<(), BoxError> {
    let db = Database::connect(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_all().await?;
            info!("All migrations rolled back");
        }
        MigrateAction::Version => match db.migration_version().await? {
            Some(version) => println!("Current migration version: {}", version),
            None => println!("No migrations applied"),
        },
        MigrateAction::Status => {
            for migration in db.migration_status().await? {
                let marker = if migration.applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, migration.name);
            }
        }
    }

    db.close().await?;
    Ok(())
}

/// Run the gRPC and HTTP servers until a shutdown signal arrives.
pub async fn run_server(config: UserServiceConfig) -> Result<(), BoxError> {
    let database = Database::connect(&config.database).await?;
    if config.auto_migrate {
        database.run_migrations().await?;
        info!("Migrations applied");
    }

    let cache: Arc<dyn CacheRepository> = Arc::new(RedisCache::connect(&config.cache).await?);

    // Create repository and service
    let user_repo = Arc::new(UserStore::new(database.get_connection()));
    let user_service: Arc<dyn UserService> =
        Arc::new(UserManager::new(user_repo, Arc::clone(&cache)));

    let request_timeout = Duration::from_secs(config.server.request_timeout_secs);
    let grpc_addr: SocketAddr = config.server.grpc_addr().parse()?;
    let http_addr: SocketAddr = config.server.http_addr().parse()?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let grpc_server = Server::builder()
        .timeout(request_timeout)
        .layer(TraceLayer::new_for_grpc())
        .add_service(proto::UserServiceServer::new(UserGrpcService::new(
            Arc::clone(&user_service),
        )))
        .serve_with_shutdown(grpc_addr, wait_for_shutdown(shutdown_rx.clone()));

    let state = AppState::new(
        build_schema(user_service),
        database.clone(),
        Arc::clone(&cache),
    );
    let router = create_router(state, request_timeout);
    let listener = TcpListener::bind(http_addr).await?;
    let http_server =
        axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown(shutdown_rx));

    info!("gRPC server listening on {}", grpc_addr);
    info!("GraphQL server listening on http://{}/query", http_addr);

    tokio::try_join!(
        async { grpc_server.await.map_err(BoxError::from) },
        async { http_server.await.map_err(BoxError::from) },
    )?;

    database.close().await?;
    info!("Servers stopped");
    Ok(())
}

/// Resolve once the shutdown flag flips or the sender goes away.
async fn wait_for_shutdown(mut shutdown_rx: watch::Receiver<bool>) {
    let _ = shutdown_rx.wait_for(|stopped| *stopped).await;
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal, stopping servers...");
}
