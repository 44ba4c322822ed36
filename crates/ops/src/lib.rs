//! Common operations layer for the whisk CLI.
//!
//! Wraps [`whisk_client::Client`] with configuration management: the
//! properties file, environment and flag overrides are merged into an
//! [`OpsConfig`], from which an [`OpsClient`] is built.

mod config;
mod error;
pub mod properties;

pub use config::OpsConfig;
pub use error::OpsError;
pub use properties::Properties;

use std::sync::Arc;

use whisk_client::{Client, ClientBuilder};

/// Re-export client and core types for consumers.
pub use whisk_client;
pub use whisk_core;

/// High-level operations client.
///
/// Cheap to clone; command handlers receive it explicitly instead of
/// reaching for a global.
#[derive(Debug, Clone)]
pub struct OpsClient {
    inner: Arc<Client>,
}

impl OpsClient {
    /// Create a new operations client from configuration.
    pub fn from_config(config: &OpsConfig) -> Result<Self, OpsError> {
        let mut builder = ClientBuilder::new().config(config.client_config()?);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| OpsError::Configuration(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    /// Access the underlying HTTP client directly.
    pub fn client(&self) -> &Client {
        &self.inner
    }

    /// The namespace requests are scoped to.
    pub fn namespace(&self) -> &str {
        self.inner.config().effective_namespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn from_config_applies_client_defaults() {
        let ops = OpsClient::from_config(&OpsConfig::new()).unwrap();
        assert_eq!(ops.namespace(), "_");
        assert_eq!(
            ops.client().config().base_url.as_ref().map(url::Url::as_str),
            Some(whisk_client::DEFAULT_BASE_URL)
        );
    }

    #[test]
    fn from_config_uses_overrides() {
        let config = OpsConfig::new()
            .with_apihost("http://localhost:3233")
            .with_namespace("guest")
            .with_timeout(Duration::from_secs(5));
        let ops = OpsClient::from_config(&config).unwrap();
        assert_eq!(ops.namespace(), "guest");
        assert_eq!(
            ops.client().config().base_url.as_ref().map(url::Url::as_str),
            Some("http://localhost:3233/api/")
        );
    }

    #[test]
    fn bad_api_host_fails_construction() {
        let err = OpsClient::from_config(&OpsConfig::new().with_apihost("ftp://files.example.com"))
            .unwrap_err();
        assert!(matches!(err, OpsError::Configuration(_)));
    }
}
