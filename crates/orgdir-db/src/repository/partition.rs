//! SurrealDB implementation of [`PartitionStore`].
//!
//! Each partition is one schemaless table named by its partition id.
//! Documents are rows holding an opaque `data` object; a `_meta` marker
//! record pins the table into existence on creation.

use orgdir_core::error::OrgDirResult;
use orgdir_core::models::PartitionDocument;
use orgdir_core::repository::PartitionStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// Record id of the marker row seeded into every partition.
const META_RECORD_ID: &str = "_meta";

#[derive(Debug, SurrealValue)]
struct DocumentRow {
    record_id: String,
    data: serde_json::Value,
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// Partition ids are interpolated into DDL statements (`REMOVE TABLE`
/// cannot be parameterized), so they must stay within the identifier
/// alphabet produced by partition naming.
fn ensure_valid_partition_id(partition_id: &str) -> Result<(), DbError> {
    let valid = !partition_id.is_empty()
        && partition_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidPartitionId(partition_id.to_string()))
    }
}

/// SurrealDB implementation of the partition store.
#[derive(Clone)]
pub struct SurrealPartitionStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPartitionStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn insert_with_id(
        &self,
        partition_id: &str,
        record_id: &str,
        data: serde_json::Value,
    ) -> Result<Result<(), surrealdb::Error>, DbError> {
        let result = self
            .db
            .query("CREATE type::record($table, $id) SET data = $data")
            .bind(("table", partition_id.to_string()))
            .bind(("id", record_id.to_string()))
            .bind(("data", data))
            .await?;

        Ok(result.check().map(|_| ()))
    }
}

impl<C: Connection> PartitionStore for SurrealPartitionStore<C> {
    async fn create(&self, partition_id: &str) -> OrgDirResult<()> {
        ensure_valid_partition_id(partition_id)?;

        // The marker write materializes the table. A pre-existing
        // marker means the partition already exists — not an error.
        let data = serde_json::json!({ "initialized": true });
        match self.insert_with_id(partition_id, META_RECORD_ID, data).await? {
            Ok(()) => Ok(()),
            Err(e) if e.to_string().contains("already exists") => Ok(()),
            Err(e) => Err(DbError::Surreal(e).into()),
        }
    }

    async fn insert_document(
        &self,
        partition_id: &str,
        data: serde_json::Value,
    ) -> OrgDirResult<PartitionDocument> {
        ensure_valid_partition_id(partition_id)?;

        let record_id = Uuid::new_v4().to_string();
        self.insert_with_id(partition_id, &record_id, data.clone())
            .await?
            .map_err(DbError::Surreal)?;

        Ok(PartitionDocument { record_id, data })
    }

    async fn list_documents(&self, partition_id: &str) -> OrgDirResult<Vec<PartitionDocument>> {
        ensure_valid_partition_id(partition_id)?;

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, data \
                 FROM type::table($table) WHERE meta::id(id) != $meta",
            )
            .bind(("table", partition_id.to_string()))
            .bind(("meta", META_RECORD_ID.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DocumentRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .map(|r| PartitionDocument {
                record_id: r.record_id,
                data: r.data,
            })
            .collect())
    }

    async fn copy_all(&self, src: &str, dst: &str) -> OrgDirResult<u64> {
        ensure_valid_partition_id(src)?;
        ensure_valid_partition_id(dst)?;

        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, data FROM type::table($table)")
            .bind(("table", src.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DocumentRow> = result.take(0).map_err(DbError::from)?;

        // One record at a time, original identity kept where possible.
        // On an identity collision the record is re-inserted under a
        // fresh id — data survives, the identity does not. Best effort:
        // a failure mid-copy leaves dst partially filled and src
        // untouched.
        let mut copied = 0u64;
        for row in rows {
            match self
                .insert_with_id(dst, &row.record_id, row.data.clone())
                .await?
            {
                Ok(()) => {}
                Err(e) if e.to_string().contains("already exists") => {
                    let fresh_id = Uuid::new_v4().to_string();
                    self.insert_with_id(dst, &fresh_id, row.data)
                        .await?
                        .map_err(DbError::Surreal)?;
                }
                Err(e) => return Err(DbError::Surreal(e).into()),
            }
            copied += 1;
        }

        Ok(copied)
    }

    async fn drop_partition(&self, partition_id: &str) -> OrgDirResult<()> {
        ensure_valid_partition_id(partition_id)?;

        self.db
            .query(format!("REMOVE TABLE IF EXISTS {partition_id}"))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::Surreal)?;

        Ok(())
    }

    async fn exists(&self, partition_id: &str) -> OrgDirResult<bool> {
        ensure_valid_partition_id(partition_id)?;

        let mut result = self
            .db
            .query("SELECT count() AS total FROM type::table($table) GROUP ALL")
            .bind(("table", partition_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0) > 0)
    }
}
