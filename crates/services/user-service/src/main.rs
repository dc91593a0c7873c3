//! User Service - gRPC and GraphQL servers for user management.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service_lib::{config::UserServiceConfig, MigrateAction};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User management service (gRPC + GraphQL)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gRPC and GraphQL servers
    Serve {
        /// Override SERVER_HOST
        #[arg(long)]
        host: Option<String>,
        /// Override HTTP_PORT
        #[arg(long)]
        http_port: Option<u16>,
        /// Override GRPC_PORT
        #[arg(long)]
        grpc_port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Roll back all migrations
    Down,
    /// Show the latest applied migration
    Version,
    /// Show migration status
    Status,
}

impl From<MigrateCommands> for MigrateAction {
    fn from(command: MigrateCommands) -> Self {
        match command {
            MigrateCommands::Up => MigrateAction::Up,
            MigrateCommands::Down => MigrateAction::Down,
            MigrateCommands::Version => MigrateAction::Version,
            MigrateCommands::Status => MigrateAction::Status,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match UserServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Serve {
            host,
            http_port,
            grpc_port,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = http_port {
                config.server.http_port = port;
            }
            if let Some(port) = grpc_port {
                config.server.grpc_port = port;
            }
            user_service_lib::run_server(config).await
        }
        Commands::Migrate { action } => {
            user_service_lib::run_migrations(action.into(), &config).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
