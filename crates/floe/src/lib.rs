//! Main Floe crate
//!
//! Wires configuration, credentials and the storage client into a
//! [`MinioConnector`](floe_connector_minio::MinioConnector) and exposes the
//! bootstrap pieces to the `floe` binary.

pub mod bootstrap;
pub mod config;
pub mod credentials;
pub mod error;
