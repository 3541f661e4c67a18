//! ORGDIR Server — Application entry point.

use orgdir_db::{DbConfig, DbManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("orgdir=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting ORGDIR server...");

    let config = DbConfig::from_env();
    let db = match DbManager::connect(&config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(e) = db.init_schema().await {
        tracing::error!(error = %e, "Failed to apply schema migrations");
        std::process::exit(1);
    }

    tracing::info!("Directory master database ready");

    // TODO: Start REST API server

    tracing::info!("ORGDIR server stopped.");
}
