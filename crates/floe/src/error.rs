use thiserror::Error;

#[derive(Error, Debug)]
pub enum FloeError {
    #[error("Failed to load configuration")]
    Config(#[from] config::ConfigError),

    #[error("Credential retrieval failed: {0}")]
    Credentials(String),

    #[error("Invalid endpoint configuration: {0}")]
    Endpoint(String),

    #[error("Catalog operation failed: {0}")]
    Connector(#[from] floe_common::Error),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}
