//! Notifications API server binary.
//!
//! This binary resolves the storage configuration, creates the concrete
//! database implementation and passes it to the API server. The API layer
//! remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use notifications::api::{self, ApiError, Config};
use notifications::config::{ConfigError, Environment, StorageConfig};
use notifications::db::{Database, DbError, SqliteDatabase};
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(notifications::binary::config))]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    #[diagnostic(code(notifications::binary::database))]
    Database(#[from] DbError),

    #[error("API server error: {0}")]
    #[diagnostic(code(notifications::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "notifications-api")]
#[command(author, version, about = "Notifications API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "4567")]
    port: u16,

    /// Deployment mode selecting the database file (development, production, test)
    #[arg(short, long)]
    env: Option<Environment>,

    /// Directory holding the per-environment database files
    /// (defaults to XDG data directory: ~/.local/share/notifications)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Explicit database file path, overriding the per-environment file
    #[arg(long)]
    db: Option<PathBuf>,

    /// Image URL stored when a notification is created without one
    #[arg(long)]
    default_image_url: Option<String>,
}

impl Cli {
    /// Apply CLI flags on top of the environment-derived configuration.
    fn storage_config(&self) -> Result<StorageConfig, ConfigError> {
        let mut config = StorageConfig::new()?;

        if let Some(env) = self.env {
            config = config.with_environment(env);
        }
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir.clone());
        }
        if let Some(db) = &self.db {
            config = config.with_db_path(db.clone());
        }
        if let Some(url) = &self.default_image_url {
            config = config.with_default_image_url(url.clone());
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    api::init_tracing();

    let storage = cli.storage_config()?;
    info!(
        environment = %storage.environment,
        path = %storage.database_path().display(),
        "Opening database"
    );

    let db = SqliteDatabase::open(&storage).await?;

    // Create or upgrade the schema before accepting requests
    db.migrate().await?;
    info!("Database schema ready");

    // Pass the abstract Database to the API layer
    api::run(
        Config {
            host: cli.host,
            port: cli.port,
        },
        db,
    )
    .await?;

    Ok(())
}
