//! Database connection and migration control.

use std::collections::HashSet;

use sea_orm::{
    ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use super::migrations::Migrator;
use common::DatabaseConfig;

/// Applied state of a single known migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub name: String,
    pub applied: bool,
}

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection pool. Migrations are not applied here.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::debug!(
            "Connecting to PostgreSQL at {}:{}/{}",
            config.host,
            config.port,
            config.name
        );

        let mut options = ConnectOptions::new(config.url());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        tracing::info!("Database connected");

        Ok(Self { connection })
    }

    /// Wrap an existing connection.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Apply all pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Roll back every applied migration.
    pub async fn rollback_all(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, None).await
    }

    /// Name of the most recently applied migration, if any.
    pub async fn migration_version(&self) -> Result<Option<String>, DbErr> {
        Migrator::install(&self.connection).await?;

        let latest = seaql_migrations::Entity::find()
            .order_by_desc(seaql_migrations::Column::Version)
            .one(&self.connection)
            .await?;

        Ok(latest.map(|m| m.version))
    }

    /// List all known migrations with their applied status.
    pub async fn migration_status(&self) -> Result<Vec<MigrationStatus>, DbErr> {
        Migrator::install(&self.connection).await?;

        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let applied = applied.contains(&name);
                MigrationStatus { name, applied }
            })
            .collect())
    }

    /// Check database connectivity.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection.ping().await
    }

    /// Close the connection pool.
    pub async fn close(self) -> Result<(), DbErr> {
        self.connection.close().await
    }
}
