//! Credential retrieval for the storage endpoint.
//!
//! Failure here is fatal at startup; no partial catalog is exposed without
//! working credentials.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::FloeError;

/// Credential payload for the storage endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageCredentials {
    pub server: String,
    pub access_key: String,
    pub secret_key: String,
}

#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn fetch(&self) -> Result<StorageCredentials, FloeError>;
}

/// Reads the credential payload from AWS Secrets Manager. The secret value
/// is the JSON object `{"server", "access_key", "secret_key"}`.
pub struct SecretsManagerCredentials {
    secret_name: String,
    region: String,
}

impl SecretsManagerCredentials {
    pub fn new(secret_name: impl Into<String>, region: impl Into<String>) -> Self {
        Self { secret_name: secret_name.into(), region: region.into() }
    }
}

#[async_trait]
impl CredentialSource for SecretsManagerCredentials {
    async fn fetch(&self) -> Result<StorageCredentials, FloeError> {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(self.region.clone()))
            .load()
            .await;
        let client = aws_sdk_secretsmanager::Client::new(&config);
        let resp = client
            .get_secret_value()
            .secret_id(&self.secret_name)
            .send()
            .await
            .map_err(|e| {
                FloeError::Credentials(format!("get secret {}: {e}", self.secret_name))
            })?;
        let payload = resp.secret_string().ok_or_else(|| {
            FloeError::Credentials(format!("secret {} has no string payload", self.secret_name))
        })?;
        serde_json::from_str(payload)
            .map_err(|e| FloeError::Credentials(format!("malformed secret payload: {e}")))
    }
}

/// Reads credentials from `FLOE_SERVER`, `FLOE_ACCESS_KEY` and
/// `FLOE_SECRET_KEY`; meant for local development against a MinIO
/// container.
pub struct EnvCredentials;

#[async_trait]
impl CredentialSource for EnvCredentials {
    async fn fetch(&self) -> Result<StorageCredentials, FloeError> {
        let read = |name: &str| {
            std::env::var(name).map_err(|_| FloeError::Credentials(format!("{name} is not set")))
        };
        Ok(StorageCredentials {
            server: read("FLOE_SERVER")?,
            access_key: read("FLOE_ACCESS_KEY")?,
            secret_key: read("FLOE_SECRET_KEY")?,
        })
    }
}
