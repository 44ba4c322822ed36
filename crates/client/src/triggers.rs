use reqwest::Method;
use serde::Serialize;
use whisk_core::Activation;

use crate::{Error, Response, Triggers};

impl Triggers<'_> {
    /// Fire a trigger with `payload`; the platform answers with the id of
    /// the trigger activation.
    pub async fn fire<P: Serialize + ?Sized>(
        &self,
        name: &str,
        payload: &P,
    ) -> Result<Response<Activation>, Error> {
        let route = Self::route(name)?;
        self.client.send(Method::POST, &route, Some(payload)).await
    }
}
