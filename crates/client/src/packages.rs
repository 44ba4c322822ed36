use reqwest::Method;
use whisk_core::BindingUpdates;

use crate::{Error, Packages, Response, Route};

impl Packages<'_> {
    /// Refresh the namespace's bindings to published packages.
    pub async fn refresh(&self) -> Result<Response<BindingUpdates>, Error> {
        let route = Route::entity("packages", "refresh");
        self.client.send(Method::POST, &route, None::<&()>).await
    }
}
