//! Reads a table's Parquet file set into one merged in-memory result.
//!
//! Files are fetched through the [`StorageClient`] and decoded with the
//! Arrow Parquet reader. All files of one table must share a single schema;
//! this is validated file by file rather than assumed.

use std::collections::HashMap;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array,
    Int64Array, Int8Array, LargeStringArray, StringArray, UInt16Array, UInt32Array,
    UInt64Array, UInt8Array,
};
use arrow::compute::concat_batches;
use arrow::datatypes::{DataType, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use bytes::Bytes;
use floe_common::{Error, Result};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value;

use crate::client::StorageClient;

/// Splits a fully qualified `database/key` file path into its parts.
fn split_qualified(path: &str) -> Result<(&str, &str)> {
    path.split_once('/')
        .filter(|(bucket, key)| !bucket.is_empty() && !key.is_empty())
        .ok_or_else(|| Error::InvalidPath(path.to_string()))
}

async fn fetch(client: &dyn StorageClient, path: &str) -> Result<Bytes> {
    let (bucket, key) = split_qualified(path)?;
    client.get_object(bucket, key).await
}

/// Schema shared by every file of the set. Only Parquet footers are
/// parsed; no row data is decoded. Fails on the first file that disagrees
/// with the others.
pub async fn read_schema(client: &dyn StorageClient, files: &[String]) -> Result<SchemaRef> {
    let mut merged: Option<SchemaRef> = None;
    for path in files {
        let bytes = fetch(client, path).await?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)?;
        let schema = builder.schema().clone();
        match &merged {
            None => merged = Some(schema),
            Some(first) if first.as_ref() != schema.as_ref() => {
                return Err(Error::SchemaMismatch { path: path.clone() });
            }
            Some(_) => {}
        }
    }
    merged.ok_or_else(|| Error::Storage("cannot derive a schema from an empty file set".to_string()))
}

/// Reads the whole file set and merges the rows into a single batch, in
/// file-list order.
pub async fn read_merged(client: &dyn StorageClient, files: &[String]) -> Result<RecordBatch> {
    let mut schema: Option<SchemaRef> = None;
    let mut batches: Vec<RecordBatch> = Vec::new();

    for path in files {
        let bytes = fetch(client, path).await?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)?;
        let file_schema = builder.schema().clone();
        match &schema {
            None => schema = Some(file_schema),
            Some(first) if first.as_ref() != file_schema.as_ref() => {
                return Err(Error::SchemaMismatch { path: path.clone() });
            }
            Some(_) => {}
        }
        for batch in builder.build()? {
            batches.push(batch?);
        }
    }

    let schema = schema
        .ok_or_else(|| Error::Storage("cannot read records from an empty file set".to_string()))?;
    Ok(concat_batches(&schema, &batches)?)
}

/// Transposes a merged batch into `column name → ordered values`. Every
/// value sequence has the batch's row count.
pub fn to_column_map(batch: &RecordBatch) -> Result<HashMap<String, Vec<Value>>> {
    let schema = batch.schema();
    let mut columns = HashMap::with_capacity(batch.num_columns());
    for (field, array) in schema.fields().iter().zip(batch.columns()) {
        let mut values = Vec::with_capacity(batch.num_rows());
        for row in 0..batch.num_rows() {
            values.push(value_at(array, row)?);
        }
        columns.insert(field.name().clone(), values);
    }
    Ok(columns)
}

fn downcast<'a, T: 'static>(array: &'a ArrayRef) -> Result<&'a T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        Error::Arrow(ArrowError::CastError(format!(
            "array does not match its declared type {}",
            array.data_type()
        )))
    })
}

/// One cell as a JSON value. Scalar types keep their type; anything else
/// falls back to Arrow's display string.
fn value_at(array: &ArrayRef, row: usize) -> Result<Value> {
    if array.is_null(row) {
        return Ok(Value::Null);
    }
    let value = match array.data_type() {
        DataType::Boolean => Value::Bool(downcast::<BooleanArray>(array)?.value(row)),
        DataType::Int8 => Value::from(downcast::<Int8Array>(array)?.value(row)),
        DataType::Int16 => Value::from(downcast::<Int16Array>(array)?.value(row)),
        DataType::Int32 => Value::from(downcast::<Int32Array>(array)?.value(row)),
        DataType::Int64 => Value::from(downcast::<Int64Array>(array)?.value(row)),
        DataType::UInt8 => Value::from(downcast::<UInt8Array>(array)?.value(row)),
        DataType::UInt16 => Value::from(downcast::<UInt16Array>(array)?.value(row)),
        DataType::UInt32 => Value::from(downcast::<UInt32Array>(array)?.value(row)),
        DataType::UInt64 => Value::from(downcast::<UInt64Array>(array)?.value(row)),
        DataType::Float32 => Value::from(downcast::<Float32Array>(array)?.value(row)),
        DataType::Float64 => Value::from(downcast::<Float64Array>(array)?.value(row)),
        DataType::Utf8 => Value::from(downcast::<StringArray>(array)?.value(row)),
        DataType::LargeUtf8 => Value::from(downcast::<LargeStringArray>(array)?.value(row)),
        _ => Value::String(array_value_to_string(array.as_ref(), row)?),
    };
    Ok(value)
}
