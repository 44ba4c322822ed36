//! Response decoding.
//!
//! Every operation hands back the [`RawResponse`] next to the decoded value,
//! or inside the error for non-2xx answers, so status and headers stay
//! inspectable either way.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ApiError, Error};

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Method of the request that produced this response.
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    pub(crate) async fn read(method: Method, response: reqwest::Response) -> Result<Self, Error> {
        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Self {
            method,
            url,
            status,
            headers,
            body,
        })
    }

    /// Turn a non-2xx response into [`Error::Api`].
    pub fn error_for_status(self) -> Result<Self, Error> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(Error::Api(Box::new(ApiError::from_response(self))))
        }
    }

    /// Decode the body into `dest`.
    ///
    /// An empty (or whitespace-only) body leaves `dest` untouched and is not
    /// an error.
    pub fn decode_into<T: DeserializeOwned>(&self, dest: &mut T) -> Result<(), Error> {
        if self.body.trim_ascii().is_empty() {
            return Ok(());
        }

        *dest = serde_json::from_slice(&self.body).map_err(|source| Error::Decoding {
            source,
            response: Box::new(self.clone()),
        })?;
        Ok(())
    }
}

/// A decoded value together with the response it came from.
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub value: T,
    pub raw: RawResponse,
}

impl<T> Response<T> {
    pub fn status(&self) -> StatusCode {
        self.raw.status
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Transform the value, keeping the raw response.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            value: f(self.value),
            raw: self.raw,
        }
    }
}

impl<T: DeserializeOwned + Default> Response<T> {
    /// Decode a 2xx response as JSON, or fail with [`Error::Api`].
    pub fn decode(raw: RawResponse) -> Result<Self, Error> {
        let raw = raw.error_for_status()?;
        let mut value = T::default();
        raw.decode_into(&mut value)?;
        Ok(Self { value, raw })
    }
}

impl Response<Bytes> {
    /// Take a 2xx body verbatim, or fail with [`Error::Api`].
    pub fn bytes(raw: RawResponse) -> Result<Self, Error> {
        let raw = raw.error_for_status()?;
        Ok(Self {
            value: raw.body.clone(),
            raw,
        })
    }
}
