//! Error handling for the protoc-gen-tmpl generation library.
//!
//! This module defines the run-level error type `Error`, along with a
//! convenient `Result` alias. Every variant here is fatal to a whole run:
//! no Operation is attempted once one of these is raised. Failures scoped to a
//! single Operation live in [`crate::generation::OperationError`] instead.
//!
//! # Examples
//!
//! ```
//! use protoc_gen_tmpl::core::error::{Error, Result};
//!
//! fn needs_input(files: &[String]) -> Result<()> {
//!     if files.is_empty() {
//!         return Err(Error::EmptyInput);
//!     }
//!     Ok(())
//! }
//!
//! assert!(needs_input(&[]).is_err());
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type for run-level generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for run-level failures
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration file could not be read
    #[error("failed to read conf file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be deserialized
    #[error("failed to unmarshal config {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// The default working directory could not be determined
    #[error("failed to determine working directory: {0}")]
    Os(#[source] std::io::Error),

    /// The request did not name any file to generate
    #[error("no input files")]
    EmptyInput,

    /// The descriptor set in the request is inconsistent
    #[error("failed to load request: {0}")]
    Registry(String),

    /// The encoded request could not be decoded
    #[error("failed to decode request: {0}")]
    Protobuf(#[from] prost::DecodeError),

    /// I/O error outside of configuration loading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new decode error for the configuration file at `path`
    pub fn decode<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new registry error
    pub fn registry<S: Into<String>>(msg: S) -> Self {
        Self::Registry(msg.into())
    }
}
