//! Common crate
//!
//! Shared error handling for the Floe crates.
//!
//! # Example
//! ```rust
//! use floe_common::Error;
//! let err = Error::Storage("bucket unreachable".to_string());
//! ```

pub mod error;

pub use error::{Error, Result};
