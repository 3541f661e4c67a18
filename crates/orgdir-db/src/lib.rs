//! ORGDIR Database — SurrealDB connection management, schema
//! migrations, and implementations of the core repository traits.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - [`repository::SurrealTenantDirectory`] and
//!   [`repository::SurrealPartitionStore`]
//! - Error types ([`DbError`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
