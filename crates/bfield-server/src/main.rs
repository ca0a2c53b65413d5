//! Server binary for the bfield event manager.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `bfield.yaml` (falling back to defaults
//!    plus environment overrides when the file is absent)
//! 3. Connect to `SQLite` and bootstrap the schema
//! 4. Build the shared application state
//! 5. Serve HTTP until terminated

use std::path::Path;
use std::sync::Arc;

use bfield_db::{Database, SqliteConfig};
use bfield_server::config::AppConfig;
use bfield_server::server::{ServerConfig, start_server};
use bfield_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default configuration file path, relative to the working directory.
const CONFIG_PATH: &str = "bfield.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the server itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!(version = bfield_server::APP_VERSION, "bfield-server starting");

    // 2. Load configuration.
    let config_path = Path::new(CONFIG_PATH);
    let config = if config_path.exists() {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()
    };
    info!(
        host = %config.server.host,
        port = config.server.port,
        database = %config.database.url,
        "Configuration loaded"
    );

    // 3. Connect to the database and bootstrap the schema.
    let db_config = SqliteConfig::new(&config.database.url)
        .with_max_connections(config.database.max_connections);
    let db = Database::connect(&db_config).await?;
    db.init_schema().await?;

    // 4. Build the shared application state.
    let state = Arc::new(AppState::new(db)?);

    // 5. Serve.
    let server_config = ServerConfig {
        host: config.server.host,
        port: config.server.port,
    };
    start_server(&server_config, state).await?;

    Ok(())
}
