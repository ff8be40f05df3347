//! The catalog capability set and its MinIO implementation.

use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use async_trait::async_trait;
use floe_common::{Error, Result};
use serde_json::Value;
use tracing::debug;

use crate::client::{BucketInfo, StorageClient};
use crate::reader;
use crate::split::Split;

/// File suffix marking an object as part of a table's data set.
pub const DATA_FILE_EXTENSION: &str = ".parquet";

const DELIMITER: char = '/';

/// Catalog operations a connector exposes to the query-engine integration
/// layer. Callers chain them: `databases` → `tables` → `columns`/`schema`
/// → `splits` → `records`, feeding each step the names returned by the
/// previous one. Every operation is stateless given the storage handle.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Databases visible through this connector.
    async fn databases(&self) -> Result<Vec<String>>;

    /// Tables of one database.
    async fn tables(&self, database: &str) -> Result<Vec<String>>;

    /// Column names of a table, in declared order.
    async fn columns(&self, database: &str, table: &str) -> Result<Vec<String>>;

    /// Typed schema for a table, derived from [`Connector::columns`]: one
    /// nullable Utf8 field per column name. Connectors with richer type
    /// metadata may override this.
    async fn schema(&self, database: &str, table: &str) -> Result<SchemaRef> {
        let columns = self.columns(database, table).await?;
        let fields: Vec<Field> = columns
            .into_iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect();
        Ok(Arc::new(Schema::new(fields)))
    }

    /// Units of work for retrieving a table.
    async fn splits(&self, database: &str, table: &str) -> Result<Vec<Split>>;

    /// Full contents of a table as `column name → ordered values`. All
    /// value sequences have the same length, the table's row count.
    async fn records(
        &self,
        database: &str,
        table: &str,
        split: &Split,
    ) -> Result<HashMap<String, Vec<Value>>>;
}

/// Names of the buckets whose name starts with `prefix`, preserving the
/// input order. An empty prefix matches every bucket; no match yields an
/// empty list, never an error.
pub fn filter_buckets(prefix: &str, buckets: &[BucketInfo]) -> Vec<String> {
    buckets
        .iter()
        .filter(|b| b.name.starts_with(prefix))
        .map(|b| b.name.clone())
        .collect()
}

/// Table name carried by one listing entry under `root`, or `None` for
/// entries that are not first-level table folders: the root marker itself
/// and plain object keys sitting directly under the root. A folder entry
/// whose name still embeds a delimiter after stripping the root means the
/// listing was not first-level-only and is rejected.
fn table_name(key: &str, root: &str) -> Result<Option<String>> {
    if key == root || !key.ends_with(DELIMITER) {
        return Ok(None);
    }
    let child = &key[..key.len() - 1];
    let name = child.strip_prefix(root).unwrap_or(child);
    if name.is_empty() || name.contains(DELIMITER) {
        return Err(Error::UnexpectedKey { key: key.to_string(), root: root.to_string() });
    }
    Ok(Some(name.to_string()))
}

/// Connector backed by a MinIO (S3-compatible) object store.
///
/// Holds only the injected storage handle and the two path settings;
/// every call re-lists storage rather than consulting cached state.
pub struct MinioConnector {
    client: Arc<dyn StorageClient>,
    tables_root: String,
    bucket_prefix: String,
}

impl MinioConnector {
    /// `tables_root` is the key prefix under which table folders live
    /// (empty for the bucket root, otherwise ending with `/`);
    /// `bucket_prefix` restricts which buckets count as databases (empty
    /// for all).
    pub fn new(
        client: Arc<dyn StorageClient>,
        tables_root: impl Into<String>,
        bucket_prefix: impl Into<String>,
    ) -> Self {
        Self { client, tables_root: tables_root.into(), bucket_prefix: bucket_prefix.into() }
    }

    fn table_prefix(&self, table: &str) -> String {
        format!("{}{}{}", self.tables_root, table, DELIMITER)
    }

    /// Fully qualified `database/key` paths of the table's Parquet files,
    /// sorted for reproducible ordering. The table's own prefix marker and
    /// keys without the data-file extension are excluded.
    pub async fn resolve_files(&self, database: &str, table: &str) -> Result<Vec<String>> {
        let prefix = self.table_prefix(table);
        let objects = self.client.list_objects(database, &prefix).await?;
        let mut files: Vec<String> = objects
            .into_iter()
            .filter(|o| o.key != prefix && o.key.ends_with(DATA_FILE_EXTENSION))
            .map(|o| format!("{database}{DELIMITER}{}", o.key))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Like [`MinioConnector::resolve_files`], but a table without data
    /// files is an error: no schema can be derived from an empty set.
    async fn data_files(&self, database: &str, table: &str) -> Result<Vec<String>> {
        let files = self.resolve_files(database, table).await?;
        if files.is_empty() {
            return Err(Error::NoDataFiles {
                database: database.to_string(),
                table: table.to_string(),
            });
        }
        Ok(files)
    }
}

#[async_trait]
impl Connector for MinioConnector {
    async fn databases(&self) -> Result<Vec<String>> {
        let buckets = self.client.list_buckets().await?;
        Ok(filter_buckets(&self.bucket_prefix, &buckets))
    }

    async fn tables(&self, database: &str) -> Result<Vec<String>> {
        let objects = self.client.list_objects(database, &self.tables_root).await?;
        let mut tables = Vec::new();
        for object in objects {
            if let Some(name) = table_name(&object.key, &self.tables_root)? {
                tables.push(name);
            }
        }
        Ok(tables)
    }

    async fn columns(&self, database: &str, table: &str) -> Result<Vec<String>> {
        let files = self.data_files(database, table).await?;
        let schema = reader::read_schema(self.client.as_ref(), &files).await?;
        Ok(schema.fields().iter().map(|f| f.name().clone()).collect())
    }

    async fn splits(&self, _database: &str, _table: &str) -> Result<Vec<Split>> {
        Ok(vec![Split::whole_table()])
    }

    async fn records(
        &self,
        database: &str,
        table: &str,
        _split: &Split,
    ) -> Result<HashMap<String, Vec<Value>>> {
        let files = self.data_files(database, table).await?;
        debug!(database, table, files = files.len(), "materializing table");
        let batch = reader::read_merged(self.client.as_ref(), &files).await?;
        reader::to_column_map(&batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets(names: &[&str]) -> Vec<BucketInfo> {
        names.iter().map(|name| BucketInfo::new(*name)).collect()
    }

    #[test]
    fn filter_buckets_matches_prefix_in_order() {
        let all = buckets(&["bucket1", "testbucket", "buck", "dummy"]);
        assert_eq!(filter_buckets("buck", &all), vec!["bucket1", "buck"]);
    }

    #[test]
    fn filter_buckets_empty_prefix_matches_all() {
        let all = buckets(&["bucket1", "testbucket", "buck", "dummy"]);
        assert_eq!(filter_buckets("", &all), vec!["bucket1", "testbucket", "buck", "dummy"]);
    }

    #[test]
    fn filter_buckets_no_match_is_empty() {
        let all = buckets(&["bucket1", "testbucket", "buck", "dummy"]);
        assert!(filter_buckets("a", &all).is_empty());
    }

    #[test]
    fn table_name_extracts_first_level_child() {
        let name = table_name("f1/f2/f3/table1/", "f1/f2/f3/").unwrap();
        assert_eq!(name.as_deref(), Some("table1"));
    }

    #[test]
    fn table_name_skips_root_marker() {
        assert_eq!(table_name("f1/f2/f3/", "f1/f2/f3/").unwrap(), None);
    }

    #[test]
    fn table_name_skips_plain_objects_under_root() {
        assert_eq!(table_name("f1/f2/f3/readme.txt", "f1/f2/f3/").unwrap(), None);
    }

    #[test]
    fn table_name_works_at_bucket_root() {
        assert_eq!(table_name("table1/", "").unwrap().as_deref(), Some("table1"));
    }

    #[test]
    fn table_name_rejects_nested_children() {
        let err = table_name("f1/f2/f3/a/b/", "f1/f2/f3/").unwrap_err();
        assert!(matches!(err, Error::UnexpectedKey { .. }));
    }
}
