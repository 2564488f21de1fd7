//! HTTP response conversion from dispatch results.
//!
//! This module converts buffered [`wkrk_core::Response`] values into axum
//! responses and builds the few responses the host produces itself.

use axum::body::Body;
use axum::http::{HeaderValue, Response, StatusCode, header};

/// Convert a dispatch result into an axum response.
pub fn into_axum_response(resp: wkrk_core::Response) -> Response<Body> {
    resp.map(Body::from)
}

/// Plain-text response generated by the host.
pub fn host_response(status: StatusCode, message: &str) -> Response<Body> {
    let mut response = Response::new(Body::from(message.to_owned()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
