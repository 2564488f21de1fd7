//! Response helper handed to route handlers.
//!
//! [`ExtendedResponse`] is created once per dispatch. Handlers use it to
//! build common responses; the dispatcher only ever calls
//! [`ExtendedResponse::error`].

use bytes::Bytes;
use http::header::{CONTENT_TYPE, InvalidHeaderValue, LOCATION};
use http::{HeaderValue, StatusCode};
use serde::Serialize;
use wkrk_common::ErrorFormat;

use crate::request::{Request, is_json_content_type};

/// Outbound response with a fully buffered body.
pub type Response = http::Response<Bytes>;

const TEXT_HTML: &str = "text/html;charset=UTF-8";
const TEXT_PLAIN: &str = "text/plain;charset=UTF-8";
const APPLICATION_JSON: &str = "application/json";

/// Errors raised while building a response.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// A redirect was requested with a non-3xx status.
    #[error("Invalid redirect status: {0}")]
    InvalidRedirectStatus(StatusCode),

    /// A header value contained invalid characters.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    /// The JSON body could not be serialized.
    #[error("Failed to serialize JSON body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Response builder for handlers.
#[derive(Debug, Clone)]
pub struct ExtendedResponse {
    status: StatusCode,
    json_errors: bool,
}

impl ExtendedResponse {
    /// Create a helper that answers `200 OK` and plain-text errors.
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            json_errors: false,
        }
    }

    /// Create a helper seeded with the inbound request.
    ///
    /// The request is only consulted for error negotiation: with
    /// [`ErrorFormat::Json`], requests declaring a JSON content type get
    /// JSON error bodies.
    pub fn for_request(request: &Request, format: ErrorFormat) -> Self {
        Self {
            status: StatusCode::OK,
            json_errors: format.negotiates_json() && is_json_content_type(request.headers()),
        }
    }

    /// Set the status used by [`send`](Self::send), [`text`](Self::text)
    /// and [`json`](Self::json).
    #[must_use]
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// HTML/text body with `text/html;charset=UTF-8`.
    pub fn send(&self, body: impl Into<Bytes>) -> Response {
        build(self.status, TEXT_HTML, body.into())
    }

    /// Plain text body with `text/plain;charset=UTF-8`.
    pub fn text(&self, body: impl Into<Bytes>) -> Response {
        build(self.status, TEXT_PLAIN, body.into())
    }

    /// Serialize `value` as a JSON body.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<Response, ResponseError> {
        let body = serde_json::to_vec(value)?;
        Ok(build(self.status, APPLICATION_JSON, body.into()))
    }

    /// Redirect to `location` with a 3xx status.
    pub fn redirect(&self, location: &str, status: StatusCode) -> Result<Response, ResponseError> {
        if !status.is_redirection() {
            return Err(ResponseError::InvalidRedirectStatus(status));
        }
        let location = HeaderValue::from_str(location)?;

        let mut response = Response::new(Bytes::new());
        *response.status_mut() = status;
        response.headers_mut().insert(LOCATION, location);
        Ok(response)
    }

    /// Redirect to `location` with `302 Found`.
    pub fn redirect_found(&self, location: &str) -> Result<Response, ResponseError> {
        self.redirect(location, StatusCode::FOUND)
    }

    /// Canonical failure response: status 500 with the message as body.
    pub fn error(&self, message: &str) -> Response {
        if self.json_errors {
            let body = serde_json::json!({ "error": message }).to_string();
            build(StatusCode::INTERNAL_SERVER_ERROR, APPLICATION_JSON, body.into())
        } else {
            build(
                StatusCode::INTERNAL_SERVER_ERROR,
                TEXT_PLAIN,
                Bytes::copy_from_slice(message.as_bytes()),
            )
        }
    }
}

impl Default for ExtendedResponse {
    fn default() -> Self {
        Self::new()
    }
}

fn build(status: StatusCode, content_type: &'static str, body: Bytes) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
