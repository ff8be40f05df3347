use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Endpoint scheme, `http` or `https`; selects the standard port
    /// (80/443) when the server address carries none.
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Secrets Manager secret holding the storage credentials.
    pub secret_name: Option<String>,
    /// AWS region the secret lives in.
    pub secret_region: Option<String>,
    /// Signing region for the S3 client; MinIO accepts any value.
    #[serde(default = "default_signing_region")]
    pub signing_region: String,
    /// Key prefix under which table folders live; empty means bucket root.
    #[serde(default)]
    pub tables_path: String,
    /// Bucket-name prefix filter; empty matches all buckets.
    #[serde(default)]
    pub bucket_prefix: String,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_signing_region() -> String {
    "us-east-1".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        let config_file_path = std::env::var("FLOE_CONFIG_PATH")
            .unwrap_or_else(|_| "crates/floe/config/default.toml".to_string());

        let s = config::Config::builder()
            .add_source(config::File::with_name(&config_file_path).required(false))
            .add_source(config::Environment::with_prefix("FLOE").separator("__"))
            .build()?;
        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn from_toml(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_settings_fall_back_to_defaults() {
        let settings = from_toml("");
        assert_eq!(settings.scheme, "https");
        assert_eq!(settings.signing_region, "us-east-1");
        assert_eq!(settings.tables_path, "");
        assert_eq!(settings.bucket_prefix, "");
        assert!(settings.secret_name.is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let settings = from_toml(
            r#"
            scheme = "http"
            secret_name = "minio/creds"
            secret_region = "eu-central-1"
            tables_path = "f1/f2/f3/"
            bucket_prefix = "buck"
            "#,
        );
        assert_eq!(settings.scheme, "http");
        assert_eq!(settings.secret_name.as_deref(), Some("minio/creds"));
        assert_eq!(settings.secret_region.as_deref(), Some("eu-central-1"));
        assert_eq!(settings.tables_path, "f1/f2/f3/");
        assert_eq!(settings.bucket_prefix, "buck");
    }
}
