//! HTTP request conversion for dispatch.
//!
//! Axum hands us a streaming body; handlers get a fully buffered
//! [`wkrk_core::Request`].

use axum::body::Body;
use axum::http::Request as HttpRequest;
use http_body_util::LengthLimitError;

/// Errors while reading an inbound request.
#[derive(Debug, thiserror::Error)]
pub enum RequestBodyError {
    /// The body exceeded the configured limit.
    #[error("Request body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    /// The body could not be read.
    #[error("Failed to read request body: {0}")]
    Read(#[source] axum::Error),
}

/// Buffer the body of an axum request.
///
/// # Arguments
///
/// * `req` - The inbound request
/// * `limit` - Largest accepted body in bytes
pub async fn buffer_request(
    req: HttpRequest<Body>,
    limit: usize,
) -> Result<wkrk_core::Request, RequestBodyError> {
    let (parts, body) = req.into_parts();

    let bytes = axum::body::to_bytes(body, limit).await.map_err(|e| {
        if is_length_limit(&e) {
            RequestBodyError::TooLarge { limit }
        } else {
            RequestBodyError::Read(e)
        }
    })?;

    Ok(HttpRequest::from_parts(parts, bytes))
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[tokio::test]
    async fn test_buffer_request() {
        let http_req = HttpRequest::builder()
            .method(Method::POST)
            .uri("/api/users?id=1")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"name": "test"}"#))
            .unwrap();

        let req = buffer_request(http_req, 1024).await.unwrap();

        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.uri().path(), "/api/users");
        assert_eq!(req.headers()["content-type"], "application/json");
        assert_eq!(req.body().as_ref(), br#"{"name": "test"}"#);
    }

    #[tokio::test]
    async fn test_buffer_request_too_large() {
        let http_req = HttpRequest::builder()
            .method(Method::POST)
            .uri("/")
            .body(Body::from(vec![0u8; 64]))
            .unwrap();

        let err = buffer_request(http_req, 16).await.unwrap_err();
        assert!(matches!(err, RequestBodyError::TooLarge { limit: 16 }));
        assert_eq!(err.to_string(), "Request body exceeds 16 bytes");
    }
}
