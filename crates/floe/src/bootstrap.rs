//! Builds the storage client and connector from settings and credentials.

use std::sync::Arc;

use floe_connector_minio::{MinioConnector, S3StorageClient};
use tracing::info;

use crate::config::Settings;
use crate::credentials::{
    CredentialSource, EnvCredentials, SecretsManagerCredentials, StorageCredentials,
};
use crate::error::FloeError;

/// Endpoint URL for the configured scheme, applying the standard port
/// convention (80/443) unless the server address carries an explicit port.
pub fn endpoint_url(scheme: &str, server: &str) -> Result<String, FloeError> {
    let default_port = match scheme {
        "http" => 80,
        "https" => 443,
        other => return Err(FloeError::Endpoint(format!("unsupported scheme {other:?}"))),
    };
    if server.contains(':') {
        Ok(format!("{scheme}://{server}"))
    } else {
        Ok(format!("{scheme}://{server}:{default_port}"))
    }
}

/// Credential source selected by the settings: Secrets Manager when a
/// secret is configured, environment variables otherwise.
pub fn credential_source(settings: &Settings) -> Box<dyn CredentialSource> {
    match (&settings.secret_name, &settings.secret_region) {
        (Some(name), Some(region)) => Box::new(SecretsManagerCredentials::new(name, region)),
        _ => Box::new(EnvCredentials),
    }
}

pub fn build_connector(
    settings: &Settings,
    credentials: &StorageCredentials,
) -> Result<MinioConnector, FloeError> {
    let endpoint = endpoint_url(&settings.scheme, &credentials.server)?;
    info!(endpoint = %endpoint, "connecting to object store");
    let client = S3StorageClient::connect(
        &endpoint,
        &settings.signing_region,
        &credentials.access_key,
        &credentials.secret_key,
    );
    Ok(MinioConnector::new(
        Arc::new(client),
        settings.tables_path.clone(),
        settings.bucket_prefix.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_endpoint_gets_port_80() {
        assert_eq!(endpoint_url("http", "minio.internal").unwrap(), "http://minio.internal:80");
    }

    #[test]
    fn https_endpoint_gets_port_443() {
        assert_eq!(endpoint_url("https", "minio.internal").unwrap(), "https://minio.internal:443");
    }

    #[test]
    fn explicit_port_passes_through() {
        assert_eq!(
            endpoint_url("http", "minio.internal:9000").unwrap(),
            "http://minio.internal:9000"
        );
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        assert!(matches!(endpoint_url("ftp", "minio.internal"), Err(FloeError::Endpoint(_))));
    }
}
