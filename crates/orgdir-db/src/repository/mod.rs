//! SurrealDB repository implementations.

mod directory;
mod partition;

pub use directory::SurrealTenantDirectory;
pub use partition::SurrealPartitionStore;
