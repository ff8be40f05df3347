use thiserror::Error;

/// Unified error type for the Floe library crates.
#[derive(Debug, Error)]
pub enum Error {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("no data files found for table {database}.{table}")]
    NoDataFiles { database: String, table: String },

    #[error("unexpected object key {key:?} under tables root {root:?}")]
    UnexpectedKey { key: String, root: String },

    #[error("schema mismatch in {path}: all data files of a table must share one schema")]
    SchemaMismatch { path: String },

    #[error("invalid data file path {0:?}, expected <database>/<key>")]
    InvalidPath(String),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type Result<T> = std::result::Result<T, Error>;
