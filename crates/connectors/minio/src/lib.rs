//! MinIO connector crate
//!
//! Maps an S3-compatible object store onto a relational catalog for a
//! federated query engine: buckets are databases, first-level key prefixes
//! under a configured tables root are tables, and the Parquet files under a
//! table prefix are the table's records.
//!
//! Every operation re-lists or re-reads storage; nothing is cached between
//! calls, so a connector handle is safe to share across concurrent requests.

pub mod client;
pub mod connector;
pub mod reader;
pub mod split;

pub use client::{BucketInfo, ObjectInfo, S3StorageClient, StorageClient};
pub use connector::{Connector, MinioConnector};
pub use split::Split;
