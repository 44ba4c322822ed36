use reqwest::Method;
use whisk_core::Info;

use crate::{Client, Error, Response, Route};

/// The API description served at the version root.
#[derive(Debug, Clone, Copy)]
pub struct InfoService<'a> {
    client: &'a Client,
}

impl<'a> InfoService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<Response<Info>, Error> {
        let route = Route::unscoped("");
        self.client.send(Method::GET, &route, None::<&()>).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::Client;

    #[tokio::test]
    async fn get_reads_version_root() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1");
                then.status(200).json_body(json!({
                    "description": "whisk API",
                    "api_version": "1.0.0",
                    "api_version_path": "v1",
                    "build": "2024-01-01T00:00:00Z",
                    "buildno": "42"
                }));
            })
            .await;

        let client = Client::builder()
            .base_url(server.url("/api/"))
            .build()
            .unwrap();
        let resp = client.info().get().await.unwrap();
        mock.assert_async().await;
        assert_eq!(resp.value.api_version.as_deref(), Some("1.0.0"));
        assert_eq!(resp.value.buildno.as_deref(), Some("42"));
    }
}
