//! Client configuration.

use url::Url;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://openwhisk.ng.bluemix.net/api/";

/// Namespace placeholder that the platform resolves to the caller's default
/// namespace.
pub const DEFAULT_NAMESPACE: &str = "_";

/// API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Connection settings shared by every resource service of a client.
///
/// Defaults are applied once when the client is constructed; the effective
/// accessors apply them again at request time so a value cleared through
/// [`Client::config_mut`](crate::Client::config_mut) still routes correctly.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Namespace to operate in; empty means [`DEFAULT_NAMESPACE`].
    pub namespace: String,
    /// Opaque credential, sent base64-encoded as a `Basic` authorization.
    pub auth_token: String,
    /// Root of the platform API; `None` means [`DEFAULT_BASE_URL`].
    pub base_url: Option<Url>,
    /// Empty means [`DEFAULT_API_VERSION`].
    pub api_version: String,
    /// Log every request and response on the `whisk::wire` target.
    pub verbose: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = auth_token.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn effective_namespace(&self) -> &str {
        if self.namespace.is_empty() {
            DEFAULT_NAMESPACE
        } else {
            &self.namespace
        }
    }

    pub fn effective_api_version(&self) -> &str {
        if self.api_version.is_empty() {
            DEFAULT_API_VERSION
        } else {
            &self.api_version
        }
    }

    /// Fill every unset field with its default.
    pub(crate) fn apply_defaults(&mut self) -> Result<(), url::ParseError> {
        if self.base_url.is_none() {
            self.base_url = Some(Url::parse(DEFAULT_BASE_URL)?);
        }
        if self.namespace.is_empty() {
            self.namespace = DEFAULT_NAMESPACE.to_string();
        }
        if self.api_version.is_empty() {
            self.api_version = DEFAULT_API_VERSION.to_string();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_values_fall_back_to_defaults() {
        let config = Config::new();
        assert_eq!(config.effective_namespace(), "_");
        assert_eq!(config.effective_api_version(), "v1");

        let config = Config::new().with_namespace("guest").with_api_version("v2");
        assert_eq!(config.effective_namespace(), "guest");
        assert_eq!(config.effective_api_version(), "v2");
    }

    #[test]
    fn apply_defaults_fills_unset_fields_only() {
        let mut config = Config::new().with_auth_token("user:pass");
        config.apply_defaults().unwrap();
        assert_eq!(config.namespace, "_");
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.base_url.unwrap().as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.auth_token, "user:pass");

        let custom = Url::parse("http://localhost:3233/api/").unwrap();
        let mut config = Config::new()
            .with_namespace("guest")
            .with_base_url(custom.clone());
        config.apply_defaults().unwrap();
        assert_eq!(config.namespace, "guest");
        assert_eq!(config.base_url, Some(custom));
    }
}
