use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::response::RawResponse;

/// Errors returned by the whisk client.
#[derive(Debug, Error)]
pub enum Error {
    /// The client could not be constructed from its configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A resource route or its query string could not be composed.
    #[error("invalid route: {0}")]
    Route(String),

    /// The request body could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The HTTP transport failed (connection refused, DNS, TLS, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A successful response carried a body that does not match the
    /// expected schema.
    #[error("failed to decode response from {}: {source}", response.url)]
    Decoding {
        #[source]
        source: serde_json::Error,
        response: Box<RawResponse>,
    },

    /// The platform answered with a non-2xx status.
    #[error(transparent)]
    Api(Box<ApiError>),

    /// A local precondition failed; no request was sent.
    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The raw HTTP response, if the error happened after one was received.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::Api(err) => Some(&err.response),
            Self::Decoding { response, .. } => Some(response),
            _ => None,
        }
    }

    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }

    /// Whether the platform reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// The decoded API error, for non-2xx responses.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// One structured sub-error of an API error envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub code: String,
}

/// Error envelope as sent by the platform.
///
/// Servers spell the message either `message` or `error`; both are accepted.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    /// Some servers send `"errors": null`.
    #[serde(default)]
    errors: Option<Vec<ErrorDetail>>,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// A non-2xx response, decoded as far as the body allows.
///
/// The raw response is always attached, even when the body was empty or not
/// valid JSON; in that case `message` and `errors` are empty.
#[derive(Debug)]
pub struct ApiError {
    pub response: RawResponse,
    pub message: String,
    pub errors: Vec<ErrorDetail>,
    /// Server-assigned error or transaction code, when present.
    pub code: Option<serde_json::Value>,
}

impl ApiError {
    pub(crate) fn from_response(response: RawResponse) -> Self {
        let envelope = serde_json::from_slice::<Envelope>(&response.body).unwrap_or_default();
        Self {
            message: envelope.message.or(envelope.error).unwrap_or_default(),
            errors: envelope.errors.unwrap_or_default(),
            code: envelope.code,
            response,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.response.status
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.response.method,
            self.response.url,
            self.response.status.as_u16()
        )?;
        if !self.message.is_empty() {
            write!(f, " {}", self.message)?;
        }
        for detail in &self.errors {
            write!(
                f,
                " [resource={} field={} code={}]",
                detail.resource, detail.field, detail.code
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use reqwest::Method;
    use reqwest::header::HeaderMap;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            method: Method::GET,
            url: "https://example.com/api/v1/namespaces/_/actions/missing"
                .parse()
                .unwrap(),
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn decodes_message_and_errors() {
        let err = ApiError::from_response(raw(
            400,
            r#"{"message":"bad","errors":[{"resource":"action","field":"exec","code":"missing"}]}"#,
        ));
        assert_eq!(err.message, "bad");
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "exec");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn accepts_error_spelling_and_code() {
        let err = ApiError::from_response(raw(
            404,
            r#"{"error":"The requested resource does not exist.","code":"b7dd2a"}"#,
        ));
        assert_eq!(err.message, "The requested resource does not exist.");
        assert_eq!(err.code, Some(serde_json::json!("b7dd2a")));
    }

    #[test]
    fn null_errors_keep_message() {
        let err = ApiError::from_response(raw(404, r#"{"message":"not found","errors":null}"#));
        assert_eq!(err.message, "not found");
        assert!(err.errors.is_empty());
    }

    #[test]
    fn malformed_body_keeps_response() {
        let err = ApiError::from_response(raw(502, "<html>Bad Gateway</html>"));
        assert!(err.message.is_empty());
        assert!(err.errors.is_empty());
        assert_eq!(err.response.status, StatusCode::BAD_GATEWAY);
        assert_eq!(&err.response.body[..], b"<html>Bad Gateway</html>");
    }

    #[test]
    fn display_includes_method_url_and_status() {
        let err = ApiError::from_response(raw(404, r#"{"message":"not found"}"#));
        assert_eq!(
            err.to_string(),
            "GET https://example.com/api/v1/namespaces/_/actions/missing: 404 not found"
        );
    }

    #[test]
    fn error_exposes_response_for_api_failures_only() {
        let api = Error::Api(Box::new(ApiError::from_response(raw(404, ""))));
        assert!(api.is_not_found());
        assert!(api.response().is_some());

        let local = Error::validation("name is required");
        assert!(local.response().is_none());
        assert_eq!(local.to_string(), "validation error: name is required");
    }
}
