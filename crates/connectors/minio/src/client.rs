//! Object-store client contract and the S3 implementation used for MinIO.

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use floe_common::{Error, Result};

/// A bucket as reported by the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketInfo {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl BucketInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), created_at: None }
    }
}

/// One entry of an object listing. A key ending with `/` is a first-level
/// child prefix ("folder"); any other key is a plain object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key: String,
}

impl ObjectInfo {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Handle to the object store backing a catalog.
///
/// Implementations must be safe to share across concurrent calls; the
/// connector holds one handle and never mutates it.
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// Delimiter-aware listing: one entry per first-level child of
    /// `prefix` (child prefixes keep their trailing `/`), plus the marker
    /// object for `prefix` itself if one exists. The catalog mapping
    /// depends on this "first level only" convention.
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectInfo>>;

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes>;
}

/// S3 client speaking to MinIO (or any S3-compatible endpoint) with
/// path-style addressing and static credentials.
pub struct S3StorageClient {
    inner: aws_sdk_s3::Client,
}

impl S3StorageClient {
    pub fn connect(endpoint: &str, region: &str, access_key: &str, secret_key: &str) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "floe");
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();
        Self { inner: aws_sdk_s3::Client::from_conf(config) }
    }
}

#[async_trait]
impl StorageClient for S3StorageClient {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let resp = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| Error::Storage(format!("list buckets: {e}")))?;

        let buckets = resp
            .buckets()
            .iter()
            .filter_map(|b| {
                b.name().map(|name| BucketInfo {
                    name: name.to_string(),
                    created_at: b
                        .creation_date()
                        .and_then(|d| DateTime::from_timestamp(d.secs(), d.subsec_nanos())),
                })
            })
            .collect();
        Ok(buckets)
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectInfo>> {
        let mut entries = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .inner
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix)
                .delimiter("/");
            if let Some(token) = continuation.take() {
                request = request.continuation_token(token);
            }
            let resp = request
                .send()
                .await
                .map_err(|e| Error::Storage(format!("list objects {bucket}/{prefix}: {e}")))?;

            for child in resp.common_prefixes() {
                if let Some(key) = child.prefix() {
                    entries.push(ObjectInfo::new(key));
                }
            }
            for object in resp.contents() {
                if let Some(key) = object.key() {
                    entries.push(ObjectInfo::new(key));
                }
            }

            match resp.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }
        Ok(entries)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let resp = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("get object {bucket}/{key}: {e}")))?;
        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| Error::Storage(format!("read object {bucket}/{key}: {e}")))?;
        Ok(data.into_bytes())
    }
}
