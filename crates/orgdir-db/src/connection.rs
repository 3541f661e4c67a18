//! SurrealDB connection management for the directory's master database.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

use crate::error::DbError;
use crate::schema::run_migrations;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Configuration for connecting to SurrealDB.
///
/// The master database holds the `organization` directory table; the
/// per-organization partition tables live alongside it in the same
/// database, addressed by partition id.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket URL (e.g., `127.0.0.1:8000`).
    pub url: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// Master database name.
    pub database: String,
    /// Root username for authentication.
    pub username: String,
    /// Root password for authentication.
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "orgdir".into(),
            database: "master".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

impl DbConfig {
    /// Build a configuration from `ORGDIR_DB_*` environment variables,
    /// falling back to [`Default`] for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env_or("ORGDIR_DB_URL", &defaults.url),
            namespace: env_or("ORGDIR_DB_NAMESPACE", &defaults.namespace),
            database: env_or("ORGDIR_DB_DATABASE", &defaults.database),
            username: env_or("ORGDIR_DB_USERNAME", &defaults.username),
            password: env_or("ORGDIR_DB_PASSWORD", &defaults.password),
        }
    }
}

/// Manages the connection to the directory's master database.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Connect to SurrealDB using the provided configuration.
    ///
    /// Authenticates as root and selects the configured namespace and
    /// master database. The schema is not touched; call
    /// [`DbManager::init_schema`] before serving directory operations.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to SurrealDB"
        );

        let db = Surreal::new::<Ws>(&config.url).await?;

        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("Connected to the directory master database");

        Ok(Self { db })
    }

    /// Apply pending migrations so the `organization` table and its
    /// uniqueness indexes exist before the first directory operation.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        run_migrations(&self.db).await
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}
