use reqwest::Method;
use whisk_core::{Activation, ActivationListOptions, ActivationLogs, ActivationResponse};

use crate::service::entity_route;
use crate::{Client, Error, Response, Route};

const COLLECTION: &str = "activations";

/// Read access to activation records. Activations are created by the
/// platform, so there is no insert or delete.
#[derive(Debug, Clone, Copy)]
pub struct Activations<'a> {
    client: &'a Client,
}

impl<'a> Activations<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn route(id: &str) -> Result<Route, Error> {
        entity_route("activation", COLLECTION, id)
    }

    /// List recent activations, newest first.
    pub async fn list(
        &self,
        options: Option<&ActivationListOptions>,
    ) -> Result<Response<Vec<Activation>>, Error> {
        let route = Route::collection(COLLECTION).options(options)?;
        self.client.send(Method::GET, &route, None::<&()>).await
    }

    pub async fn get(&self, id: &str) -> Result<Response<Activation>, Error> {
        let route = Self::route(id)?;
        self.client.send(Method::GET, &route, None::<&()>).await
    }

    pub async fn logs(&self, id: &str) -> Result<Response<ActivationLogs>, Error> {
        let route = Self::route(id)?.segments("logs");
        self.client.send(Method::GET, &route, None::<&()>).await
    }

    pub async fn result(&self, id: &str) -> Result<Response<ActivationResponse>, Error> {
        let route = Self::route(id)?.segments("result");
        self.client.send(Method::GET, &route, None::<&()>).await
    }
}
