use reqwest::Method;
use serde::Serialize;
use whisk_core::Activation;

use crate::{Actions, Error, Response};

impl Actions<'_> {
    /// Invoke an action with `payload` as its parameters.
    ///
    /// A blocking invocation waits for the activation to finish and returns
    /// the full record; a non-blocking one returns as soon as the platform
    /// accepts it, with only the activation id filled in.
    pub async fn invoke<P: Serialize + ?Sized>(
        &self,
        name: &str,
        payload: &P,
        blocking: bool,
    ) -> Result<Response<Activation>, Error> {
        let route = Self::route(name)?.param("blocking", blocking);
        self.client.send(Method::POST, &route, Some(payload)).await
    }

    /// Invoke an action, wait for it, and return only its result.
    pub async fn invoke_result<P: Serialize + ?Sized>(
        &self,
        name: &str,
        payload: &P,
    ) -> Result<Response<serde_json::Value>, Error> {
        let route = Self::route(name)?
            .param("blocking", true)
            .param("result", true);
        self.client.send(Method::POST, &route, Some(payload)).await
    }
}
