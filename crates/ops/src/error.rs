//! Error types for the operations layer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the operations layer.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The properties file could not be read or written.
    #[error("properties file {}: {source}", path.display())]
    Properties {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the underlying HTTP client.
    #[error(transparent)]
    Client(#[from] whisk_client::Error),
}
