//! Request construction: route composition, body encoding and
//! authentication.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Request};
use serde::Serialize;
use url::Url;

use crate::{Client, Config, Error};

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/');

/// A resource route, relative to the namespace (or, for unscoped routes, to
/// the API version root).
///
/// Routes are built once per operation from a resource name, optional entity
/// name and an optional option bag; the same builder serves every resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: String,
    query: Vec<(String, String)>,
    scoped: bool,
    /// Namespace named by a fully qualified entity name.
    namespace: Option<String>,
}

/// Split a fully qualified name `/namespace/rest` into its namespace and the
/// remaining path. Names without a leading `/` are returned unchanged.
pub fn split_qualified(name: &str) -> (Option<&str>, &str) {
    match name.strip_prefix('/') {
        Some(rest) => {
            let rest = rest.trim_start_matches('/');
            match rest.split_once('/') {
                Some((namespace, path)) => (Some(namespace), path),
                None => (Some(rest), ""),
            }
        }
        None => (None, name),
    }
}

impl Route {
    /// The collection route of a resource, e.g. `actions`.
    pub fn collection(resource: &str) -> Self {
        Self {
            path: utf8_percent_encode(resource, SEGMENT).to_string(),
            query: Vec::new(),
            scoped: true,
            namespace: None,
        }
    }

    /// The route of one entity, e.g. `actions/{name}`.
    ///
    /// A `/` in `name` separates a package from the entity and is kept;
    /// every segment is escaped on its own. A fully qualified name such as
    /// `/whisk.system/alarms/alarm` routes to its own namespace instead of the
    /// configured one.
    pub fn entity(resource: &str, name: &str) -> Self {
        let (namespace, path) = split_qualified(name);
        let mut route = Self::collection(resource).segments(path);
        route.namespace = namespace.filter(|ns| !ns.is_empty()).map(str::to_string);
        route
    }

    /// A route under the API version root that skips the namespace prefix.
    pub fn unscoped(path: &str) -> Self {
        Self {
            scoped: false,
            ..Self::collection("").segments(path)
        }
    }

    /// Append one or more `/`-separated segments.
    #[must_use]
    pub fn segments(mut self, path: &str) -> Self {
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if !self.path.is_empty() {
                self.path.push('/');
            }
            self.path.extend(utf8_percent_encode(segment, SEGMENT));
        }
        self
    }

    /// Append a single query parameter.
    #[must_use]
    pub fn param(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Flatten an option bag into query parameters.
    ///
    /// `None` adds nothing; option bags skip their default fields when
    /// serialized, so a default bag adds nothing either. Only structs and
    /// maps can be encoded.
    pub fn options<Q: Serialize>(mut self, options: Option<&Q>) -> Result<Self, Error> {
        let Some(options) = options else {
            return Ok(self);
        };

        let encoded = serde_urlencoded::to_string(options)
            .map_err(|e| Error::Route(format!("cannot encode query options: {e}")))?;
        self.query.extend(url::form_urlencoded::parse(encoded.as_bytes()).into_owned());
        Ok(self)
    }

    /// The escaped path below the namespace (or the version root).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the route lives under `namespaces/{namespace}`.
    pub fn is_scoped(&self) -> bool {
        self.scoped
    }

    /// The namespace this route resolves under, given the configuration.
    pub fn namespace<'a>(&'a self, config: &'a Config) -> &'a str {
        self.namespace
            .as_deref()
            .unwrap_or(config.effective_namespace())
    }

    /// Resolve against the configured base URL.
    ///
    /// The relative reference `{version}/namespaces/{namespace}/{path}` is
    /// resolved the way a browser resolves a link, so a base URL without a
    /// trailing slash loses its last path segment.
    pub fn resolve(&self, config: &Config) -> Result<Url, Error> {
        let base = match &config.base_url {
            Some(url) => url.clone(),
            None => Url::parse(crate::config::DEFAULT_BASE_URL)
                .map_err(|e| Error::Route(e.to_string()))?,
        };

        let mut relative = config.effective_api_version().to_string();
        if self.scoped {
            relative.push_str("/namespaces/");
            relative.extend(utf8_percent_encode(self.namespace(config), SEGMENT));
        }
        if !self.path.is_empty() {
            relative.push('/');
            relative.push_str(&self.path);
        }

        let mut url = base
            .join(&relative)
            .map_err(|e| Error::Route(format!("cannot resolve '{relative}' against {base}: {e}")))?;

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

impl Client {
    /// Build an authenticated request without sending it.
    ///
    /// `Content-Type: application/json` is only set when a body is present.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        route: &Route,
        body: Option<&B>,
    ) -> Result<Request, Error> {
        let url = route.resolve(&self.config)?;

        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            let encoded = serde_json::to_vec(body).map_err(Error::Encoding)?;
            builder = builder.header(CONTENT_TYPE, "application/json").body(encoded);
        }

        if !self.config.auth_token.is_empty() {
            let credential = STANDARD.encode(self.config.auth_token.as_bytes());
            builder = builder.header(AUTHORIZATION, format!("Basic {credential}"));
        }

        builder.build().map_err(|e| Error::Route(e.to_string()))
    }
}
