use reqwest::Method;
use serde::Deserialize;
use whisk_core::{Namespace, NamespaceContents};

use crate::service::require_name;
use crate::{Client, Error, Response, Route};

/// Namespace lookups. These routes sit directly under the API version and
/// ignore the configured namespace.
#[derive(Debug, Clone, Copy)]
pub struct Namespaces<'a> {
    client: &'a Client,
}

/// The listing is a bare array of names on current platforms; full
/// documents are accepted as well.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listed {
    Name(String),
    Document(Namespace),
}

impl From<Listed> for Namespace {
    fn from(entry: Listed) -> Self {
        match entry {
            Listed::Name(name) => Namespace::new(name),
            Listed::Document(namespace) => namespace,
        }
    }
}

impl<'a> Namespaces<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List the namespaces the credentials can access.
    pub async fn list(&self) -> Result<Response<Vec<Namespace>>, Error> {
        let route = Route::unscoped("namespaces");
        let resp: Response<Vec<Listed>> = self.client.send(Method::GET, &route, None::<&()>).await?;
        Ok(resp.map(|entries| entries.into_iter().map(Namespace::from).collect()))
    }

    /// Fetch a namespace with its actions, packages, triggers and rules.
    pub async fn get(&self, name: &str) -> Result<Response<Namespace>, Error> {
        require_name("namespace", name)?;
        let route = Route::unscoped("namespaces").segments(name);
        let resp: Response<NamespaceContents> =
            self.client.send(Method::GET, &route, None::<&()>).await?;
        Ok(resp.map(|contents| Namespace {
            name: name.to_string(),
            contents: Some(contents),
        }))
    }
}
