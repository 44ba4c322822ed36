//! The list/get/insert/delete operations every namespaced resource shares.

use std::marker::PhantomData;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use whisk_core::{Action, ListOptions, Named, Package, Rule, Trigger};

use crate::request::split_qualified;
use crate::{Client, Error, Response, Route};

/// A namespaced resource kind with the standard CRUD routes.
pub trait Resource: Serialize + DeserializeOwned + Default + Named {
    /// Collection segment of the route, e.g. `actions`.
    const COLLECTION: &'static str;

    /// Singular noun used in messages, e.g. `action`.
    const KIND: &'static str;
}

impl Resource for Action {
    const COLLECTION: &'static str = "actions";
    const KIND: &'static str = "action";
}

impl Resource for Trigger {
    const COLLECTION: &'static str = "triggers";
    const KIND: &'static str = "trigger";
}

impl Resource for Rule {
    const COLLECTION: &'static str = "rules";
    const KIND: &'static str = "rule";
}

impl Resource for Package {
    const COLLECTION: &'static str = "packages";
    const KIND: &'static str = "package";
}

pub type Actions<'a> = Service<'a, Action>;
pub type Triggers<'a> = Service<'a, Trigger>;
pub type Rules<'a> = Service<'a, Rule>;
pub type Packages<'a> = Service<'a, Package>;

/// Operations on one resource kind, borrowing the client that issues them.
#[derive(Debug)]
pub struct Service<'a, R> {
    pub(crate) client: &'a Client,
    kind: PhantomData<fn() -> R>,
}

impl<R> Clone for Service<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Service<'_, R> {}

impl<'a, R: Resource> Service<'a, R> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            client,
            kind: PhantomData,
        }
    }

    pub(crate) fn route(name: &str) -> Result<Route, Error> {
        entity_route(R::KIND, R::COLLECTION, name)
    }

    /// List the entities of the namespace.
    pub async fn list(&self, options: Option<&ListOptions>) -> Result<Response<Vec<R>>, Error> {
        let route = Route::collection(R::COLLECTION).options(options)?;
        self.client.send(Method::GET, &route, None::<&()>).await
    }

    pub async fn get(&self, name: &str) -> Result<Response<R>, Error> {
        let route = Self::route(name)?;
        self.client.send(Method::GET, &route, None::<&()>).await
    }

    /// Create the entity, or replace it when `overwrite` is set.
    pub async fn insert(&self, entity: &R, overwrite: bool) -> Result<Response<R>, Error> {
        let route = Self::route(entity.name())?.param("overwrite", overwrite);
        self.client.send(Method::PUT, &route, Some(entity)).await
    }

    /// Delete the entity; the platform answers with the deleted document.
    pub async fn delete(&self, name: &str) -> Result<Response<R>, Error> {
        let route = Self::route(name)?;
        self.client.send(Method::DELETE, &route, None::<&()>).await
    }
}

/// Reject names that are empty or contain `.`/`..` segments, which would
/// move the request outside its collection once the URL is resolved.
pub(crate) fn require_name(kind: &str, name: &str) -> Result<(), Error> {
    if name.trim_matches('/').is_empty() {
        return Err(Error::validation(format!("{kind} name is required")));
    }
    if name.split('/').any(|segment| segment == "." || segment == "..") {
        return Err(Error::validation(format!(
            "{kind} name '{name}' contains a relative path segment"
        )));
    }
    Ok(())
}

/// The route of one named entity. A fully qualified name must name an entity
/// after its namespace.
pub(crate) fn entity_route(kind: &str, collection: &str, name: &str) -> Result<Route, Error> {
    require_name(kind, name)?;
    if let (Some(_), path) = split_qualified(name) {
        require_name(kind, path)?;
    }
    Ok(Route::entity(collection, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    async fn setup() -> (MockServer, Client) {
        let server = MockServer::start_async().await;
        let client = Client::builder()
            .base_url(server.url("/api/"))
            .auth_token("user:pass")
            .build()
            .unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn list_without_options_has_no_query() {
        let (server, client) = setup().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/namespaces/_/triggers");
                then.status(200)
                    .json_body(serde_json::json!([{"name": "t1"}, {"name": "t2"}]));
            })
            .await;

        let resp = client.triggers().list(None).await.unwrap();
        mock.assert_async().await;
        assert_eq!(resp.value.len(), 2);
        assert_eq!(resp.raw.url.query(), None);

        let resp = client
            .triggers()
            .list(Some(&ListOptions::default()))
            .await
            .unwrap();
        assert_eq!(resp.raw.url.query(), None);
    }

    #[tokio::test]
    async fn list_with_paging_sends_query() {
        let (server, client) = setup().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/namespaces/_/packages")
                    .query_param("limit", "10")
                    .query_param("skip", "20")
                    .query_param("public", "true");
                then.status(200).json_body(serde_json::json!([]));
            })
            .await;

        let opts = ListOptions {
            public: true,
            ..ListOptions::default().with_limit(10).with_skip(20)
        };
        let resp = client.packages().list(Some(&opts)).await.unwrap();
        mock.assert_async().await;
        assert!(resp.value.is_empty());
    }

    #[tokio::test]
    async fn get_missing_returns_api_error_with_response() {
        let (server, client) = setup().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/namespaces/_/actions/missing");
                then.status(404)
                    .json_body(serde_json::json!({"message": "not found", "errors": []}));
            })
            .await;

        let err = client.actions().get("missing").await.unwrap_err();
        let api = err.api_error().expect("api error");
        assert_eq!(api.message, "not found");
        assert!(api.errors.is_empty());
        assert_eq!(api.status(), reqwest::StatusCode::NOT_FOUND);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_uses_delete_verb() {
        let (server, client) = setup().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/v1/namespaces/_/rules/r1");
                then.status(200).json_body(serde_json::json!({"name": "r1"}));
            })
            .await;

        let resp = client.rules().delete("r1").await.unwrap();
        mock.assert_async().await;
        assert_eq!(resp.value.name, "r1");
    }

    #[tokio::test]
    async fn empty_name_is_rejected_without_a_request() {
        let (server, client) = setup().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200);
            })
            .await;

        let err = client.actions().get("").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        let err = client.packages().insert(&Package::default(), false).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(mock.calls_async().await, 0);
    }

    #[tokio::test]
    async fn relative_segments_are_rejected_without_a_request() {
        let (server, client) = setup().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200);
            })
            .await;

        for name in ["..", "../../../namespaces", "pkg/./a", "/guest/..", "/guest"] {
            let err = client.actions().delete(name).await.unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{name}: {err}");
        }
        assert_eq!(mock.calls_async().await, 0);
    }

    #[tokio::test]
    async fn qualified_name_targets_its_namespace() {
        let (server, client) = setup().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/namespaces/whisk.system/packages/alarms");
                then.status(200).json_body(serde_json::json!({"name": "alarms"}));
            })
            .await;

        let resp = client.packages().get("/whisk.system/alarms").await.unwrap();
        mock.assert_async().await;
        assert_eq!(resp.value.name, "alarms");
    }

    #[tokio::test]
    async fn server_error_without_json_still_fails() {
        let (server, client) = setup().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/namespaces/_/triggers/t");
                then.status(503).body("upstream unavailable");
            })
            .await;

        let err = client.triggers().get("t").await.unwrap_err();
        let raw = err.response().expect("raw response attached");
        assert_eq!(raw.status.as_u16(), 503);
        assert_eq!(&raw.body[..], b"upstream unavailable");
        assert!(err.api_error().unwrap().message.is_empty());
    }
}
