//! Configuration for the operations layer.

use std::time::Duration;

use url::Url;
use whisk_client::Config;

use crate::OpsError;
use crate::properties::{self, Properties};

/// Connection settings gathered from the properties file, the environment
/// and command-line flags.
///
/// `None` fields fall through to the next layer and finally to the client
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpsConfig {
    /// API host: a bare host name or a full URL.
    pub apihost: Option<String>,
    pub auth: Option<String>,
    pub namespace: Option<String>,
    pub api_version: Option<String>,
    pub verbose: bool,
    /// Transport timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl OpsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the recognised keys of a properties file.
    pub fn from_properties(props: &Properties) -> Self {
        let value = |key| {
            props
                .get(key)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            apihost: value(properties::APIHOST),
            auth: value(properties::AUTH),
            namespace: value(properties::NAMESPACE),
            api_version: value(properties::APIVERSION),
            verbose: false,
            timeout: None,
        }
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: OpsConfig) -> Self {
        Self {
            apihost: overrides.apihost.or(self.apihost),
            auth: overrides.auth.or(self.auth),
            namespace: overrides.namespace.or(self.namespace),
            api_version: overrides.api_version.or(self.api_version),
            verbose: overrides.verbose || self.verbose,
            timeout: overrides.timeout.or(self.timeout),
        }
    }

    #[must_use]
    pub fn with_apihost(mut self, apihost: impl Into<String>) -> Self {
        self.apihost = Some(apihost.into());
        self
    }

    #[must_use]
    pub fn with_auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The API root derived from [`apihost`](Self::apihost).
    ///
    /// A bare host becomes `https://{host}/api/`; a URL without a path gets
    /// `/api/`, and any other path gains a trailing slash so the API version
    /// resolves beneath it.
    pub fn base_url(&self) -> Result<Option<Url>, OpsError> {
        let Some(apihost) = self.apihost.as_deref().map(str::trim).filter(|h| !h.is_empty())
        else {
            return Ok(None);
        };

        let raw = if apihost.contains("://") {
            apihost.to_string()
        } else {
            format!("https://{apihost}")
        };
        let mut url = Url::parse(&raw)
            .map_err(|e| OpsError::Configuration(format!("invalid API host '{apihost}': {e}")))?;

        if url.path() == "/" {
            url.set_path("/api/");
        } else if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Some(url))
    }

    /// Translate into the client's configuration.
    pub fn client_config(&self) -> Result<Config, OpsError> {
        let mut config = Config::new().with_verbose(self.verbose);
        if let Some(url) = self.base_url()? {
            config = config.with_base_url(url);
        }
        if let Some(auth) = &self.auth {
            config = config.with_auth_token(auth.clone());
        }
        if let Some(namespace) = &self.namespace {
            config = config.with_namespace(namespace.clone());
        }
        if let Some(version) = &self.api_version {
            config = config.with_api_version(version.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https_and_api_path() {
        let config = OpsConfig::new().with_apihost("openwhisk.example.com");
        assert_eq!(
            config.base_url().unwrap().unwrap().as_str(),
            "https://openwhisk.example.com/api/"
        );
    }

    #[test]
    fn url_host_keeps_scheme_and_port() {
        let config = OpsConfig::new().with_apihost("http://localhost:3233");
        assert_eq!(
            config.base_url().unwrap().unwrap().as_str(),
            "http://localhost:3233/api/"
        );

        let config = OpsConfig::new().with_apihost("http://gateway.local/whisk/api");
        assert_eq!(
            config.base_url().unwrap().unwrap().as_str(),
            "http://gateway.local/whisk/api/"
        );
    }

    #[test]
    fn missing_host_means_client_default() {
        assert_eq!(OpsConfig::new().base_url().unwrap(), None);
        assert_eq!(OpsConfig::new().with_apihost("  ").base_url().unwrap(), None);
    }

    #[test]
    fn invalid_host_is_a_configuration_error() {
        let err = OpsConfig::new()
            .with_apihost("http://[::1")
            .base_url()
            .unwrap_err();
        assert!(matches!(err, OpsError::Configuration(_)));
    }

    #[test]
    fn overrides_win_over_properties() {
        let props = Properties::parse("APIHOST=props.example.com\nAUTH=props:key\nNAMESPACE=\n");
        let from_file = OpsConfig::from_properties(&props);
        assert_eq!(from_file.namespace, None);

        let merged = from_file.merge(OpsConfig::new().with_auth("flag:key").with_verbose(true));
        assert_eq!(merged.apihost.as_deref(), Some("props.example.com"));
        assert_eq!(merged.auth.as_deref(), Some("flag:key"));
        assert!(merged.verbose);
    }

    #[test]
    fn client_config_carries_every_field() {
        let config = OpsConfig::new()
            .with_apihost("localhost:3233")
            .with_auth("user:pass")
            .with_namespace("guest")
            .with_api_version("v2")
            .with_verbose(true)
            .client_config()
            .unwrap();

        assert_eq!(config.auth_token, "user:pass");
        assert_eq!(config.namespace, "guest");
        assert_eq!(config.api_version, "v2");
        assert!(config.verbose);
        assert_eq!(
            config.base_url.map(String::from).as_deref(),
            Some("https://localhost:3233/api/")
        );
    }
}
