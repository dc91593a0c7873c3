//! Standalone migration runner: `migrate <up|down|version>`.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service_lib::{config::UserServiceConfig, run_migrations, MigrateAction};

#[derive(Parser)]
#[command(name = "migrate")]
#[command(about = "Apply or roll back user-service database migrations")]
struct Cli {
    /// Migration command
    #[arg(value_enum)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    /// Apply all pending migrations
    Up,
    /// Roll back all migrations
    Down,
    /// Print the latest applied migration
    Version,
}

impl From<Command> for MigrateAction {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrateAction::Up,
            Command::Down => MigrateAction::Down,
            Command::Version => MigrateAction::Version,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match UserServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_migrations(cli.command.into(), &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Migration failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
