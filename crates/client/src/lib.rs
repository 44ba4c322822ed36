//! Whisk HTTP Client
//!
//! A typed Rust client for the REST API of a whisk serverless platform:
//! actions, triggers, rules, packages, activations and namespaces.
//!
//! # Quick Start
//!
//! ```no_run
//! use whisk_client::Client;
//! use whisk_core::Action;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), whisk_client::Error> {
//!     let client = Client::builder()
//!         .base_url("http://localhost:3233/api/")
//!         .auth_token("uuid:key")
//!         .build()?;
//!
//!     let action = Action::new("hello").with_exec("nodejs:20", "function main() { return {}; }");
//!     let created = client.actions().insert(&action, true).await?;
//!     println!("version {}", created.value.version);
//!
//!     let activation = client
//!         .actions()
//!         .invoke("hello", &serde_json::json!({"name": "world"}), true)
//!         .await?;
//!     println!("{:?}", activation.value.result());
//!     Ok(())
//! }
//! ```
//!
//! # Results
//!
//! Every operation returns [`Response<T>`]: the decoded value plus the
//! [`RawResponse`] it came from. A non-2xx answer becomes [`Error::Api`],
//! which still carries the raw response so status and headers can be
//! inspected.

mod config;
mod error;
pub mod request;
pub mod response;

mod actions;
mod activations;
mod info;
mod namespaces;
mod packages;
mod rules;
mod service;
mod triggers;

pub use config::{Config, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_NAMESPACE};
pub use error::{ApiError, Error, ErrorDetail};
pub use request::{Route, split_qualified};
pub use response::{RawResponse, Response};

pub use activations::Activations;
pub use info::InfoService;
pub use namespaces::Namespaces;
pub use service::{Actions, Packages, Resource, Rules, Service, Triggers};

// Re-export core types so callers don't need a direct `whisk_core` dependency.
pub use whisk_core;

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use reqwest::{Method, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

/// Target used for the verbose request/response log.
pub const WIRE_TARGET: &str = "whisk::wire";

/// HTTP client for the whisk platform.
///
/// The client owns the [`Config`]; the resource services returned by
/// [`actions`](Client::actions), [`rules`](Client::rules) and friends borrow
/// it, so a change made through [`config_mut`](Client::config_mut) applies
/// to every request issued afterwards.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Config,
}

/// Builder for configuring a [`Client`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: Config,
    base_url: Option<String>,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the API root, e.g. `https://openwhisk.example.com/api/`.
    ///
    /// Parsed when the client is built.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Namespace for scoped routes; empty means `_`, the caller's default.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Credential sent as HTTP basic auth, usually `uuid:key`.
    #[must_use]
    pub fn auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.config.auth_token = auth_token.into();
        self
    }

    /// API version segment of every route; defaults to `v1`.
    #[must_use]
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.config.api_version = api_version.into();
        self
    }

    /// Log every request and response under [`WIRE_TARGET`].
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Set the transport timeout. Without one, requests wait indefinitely.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a custom reqwest Client.
    ///
    /// Useful for configuring TLS, proxies, or other advanced settings.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client, Error> {
        let mut config = self.config;
        if let Some(raw) = self.base_url {
            let url = Url::parse(&raw)
                .map_err(|e| Error::Configuration(format!("invalid base URL '{raw}': {e}")))?;
            config.base_url = Some(url);
        }

        let http = match self.client {
            Some(c) => c,
            None => {
                let mut builder = reqwest::Client::builder()
                    .user_agent(concat!("whisk-client/", env!("CARGO_PKG_VERSION")));
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder
                    .build()
                    .map_err(|e| Error::Configuration(e.to_string()))?
            }
        };

        Client::with_http(config, http)
    }
}

impl Client {
    /// Create a client from a configuration, applying defaults.
    pub fn new(config: Config) -> Result<Self, Error> {
        ClientBuilder::new().config(config).build()
    }

    /// Create a builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    fn with_http(mut config: Config, http: reqwest::Client) -> Result<Self, Error> {
        config
            .apply_defaults()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        if let Some(url) = &config.base_url
            && (!matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base())
        {
            return Err(Error::Configuration(format!(
                "base URL must be an http(s) URL, got '{url}'"
            )));
        }

        Ok(Self { http, config })
    }

    /// The configuration requests are built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the shared configuration, e.g. to switch namespace
    /// or credentials between requests.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Actions, including invocation.
    pub fn actions(&self) -> Actions<'_> {
        Service::new(self)
    }

    /// Triggers, including firing.
    pub fn triggers(&self) -> Triggers<'_> {
        Service::new(self)
    }

    /// Rules, including enabling and disabling.
    pub fn rules(&self) -> Rules<'_> {
        Service::new(self)
    }

    /// Packages and package bindings.
    pub fn packages(&self) -> Packages<'_> {
        Service::new(self)
    }

    /// Activation records, results and logs.
    pub fn activations(&self) -> Activations<'_> {
        Activations::new(self)
    }

    /// Namespaces visible to the credential.
    pub fn namespaces(&self) -> Namespaces<'_> {
        Namespaces::new(self)
    }

    /// The platform's API description.
    pub fn info(&self) -> InfoService<'_> {
        InfoService::new(self)
    }

    /// Send a prepared request and read the whole response.
    ///
    /// Non-2xx statuses are not turned into errors here; see
    /// [`RawResponse::error_for_status`].
    pub async fn execute(&self, request: Request) -> Result<RawResponse, Error> {
        let method = request.method().clone();
        debug!(%method, url = %request.url(), "sending request");

        if self.config.verbose {
            let body = request
                .body()
                .and_then(reqwest::Body::as_bytes)
                .map(String::from_utf8_lossy)
                .unwrap_or_default();
            info!(
                target: WIRE_TARGET,
                %method,
                url = %request.url(),
                headers = ?redacted(request.headers()),
                %body,
                "request"
            );
        }

        let response = self.http.execute(request).await?;
        let raw = RawResponse::read(method, response).await?;

        debug!(status = %raw.status, url = %raw.url, bytes = raw.body.len(), "received response");
        if self.config.verbose {
            info!(
                target: WIRE_TARGET,
                status = %raw.status,
                headers = ?raw.headers,
                body = %String::from_utf8_lossy(&raw.body),
                "response"
            );
        }

        Ok(raw)
    }

    /// Issue a request and decode a 2xx JSON body into `T`.
    pub async fn send<T, B>(
        &self,
        method: Method,
        route: &Route,
        body: Option<&B>,
    ) -> Result<Response<T>, Error>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let request = self.new_request(method, route, body)?;
        let raw = self.execute(request).await?;
        Response::decode(raw)
    }

    /// Issue a request and return a 2xx body verbatim.
    pub async fn send_raw<B>(
        &self,
        method: Method,
        route: &Route,
        body: Option<&B>,
    ) -> Result<Response<Bytes>, Error>
    where
        B: Serialize + ?Sized,
    {
        let request = self.new_request(method, route, body)?;
        let raw = self.execute(request).await?;
        Response::<Bytes>::bytes(raw)
    }
}

/// Header dump with credentials masked.
fn redacted(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if name == AUTHORIZATION {
                "<redacted>".to_string()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            (name.to_string(), shown)
        })
        .collect()
}
