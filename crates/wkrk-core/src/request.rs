//! Request wrapper handed to route handlers.
//!
//! [`ExtendedRequest`] wraps the raw inbound request and adds a few
//! conveniences (header lookup, query decoding, body decoding). The
//! dispatcher itself never looks inside it.

use std::sync::Arc;

use bytes::Bytes;
use http::HeaderMap;
use http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

/// Raw inbound request with a fully buffered body.
pub type Request = http::Request<Bytes>;

/// Path component of a request URI.
///
/// Scheme, authority and query are ignored. A URI without a path (for
/// example `https://worker.example.com`) resolves to `/`.
pub fn request_path(uri: &http::Uri) -> &str {
    match uri.path() {
        "" => "/",
        path => path,
    }
}

/// Check whether a header map declares a JSON content type.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"))
}

/// Convenience wrapper around the raw request.
///
/// Cloning is cheap; the raw request is shared.
#[derive(Debug, Clone)]
pub struct ExtendedRequest {
    inner: Arc<Request>,
}

impl ExtendedRequest {
    /// Wrap a shared raw request.
    pub fn new(inner: Arc<Request>) -> Self {
        Self { inner }
    }

    /// The raw request.
    pub fn raw(&self) -> &Request {
        &self.inner
    }

    /// HTTP method, as sent by the client.
    pub fn method(&self) -> &http::Method {
        self.inner.method()
    }

    /// Path component of the request URL.
    pub fn path(&self) -> &str {
        request_path(self.inner.uri())
    }

    /// Get a header value by name (case-insensitive).
    ///
    /// Values that are not visible ASCII are treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE.as_str())
    }

    /// Check if the request has a JSON content type.
    pub fn is_json(&self) -> bool {
        is_json_content_type(self.inner.headers())
    }

    /// Decoded query string pairs, in order of appearance.
    pub fn query(&self) -> Vec<(String, String)> {
        self.inner
            .uri()
            .query()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query()
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Raw request body.
    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// Request body as UTF-8 text.
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(self.inner.body())
    }

    /// Deserialize the request body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(self.inner.body())
    }
}

impl From<Request> for ExtendedRequest {
    fn from(request: Request) -> Self {
        Self::new(Arc::new(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn build(uri: &str) -> http::request::Builder {
        http::Request::builder().uri(uri)
    }

    #[test]
    fn test_request_path() {
        let uri: http::Uri = "https://worker.example.com".parse().unwrap();
        assert_eq!(request_path(&uri), "/");

        let uri: http::Uri = "https://worker.example.com/users?id=1".parse().unwrap();
        assert_eq!(request_path(&uri), "/users");

        let uri: http::Uri = "/api/test".parse().unwrap();
        assert_eq!(request_path(&uri), "/api/test");
    }

    #[test]
    fn test_get_header() {
        let req: ExtendedRequest = build("/")
            .header("Content-Type", "application/json")
            .body(Bytes::new())
            .unwrap()
            .into();

        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert!(req.header("X-Missing").is_none());
    }

    #[test]
    fn test_is_json() {
        let req: ExtendedRequest = build("/").body(Bytes::new()).unwrap().into();
        assert!(!req.is_json());

        let req: ExtendedRequest = build("/")
            .header("Content-Type", "application/json; charset=utf-8")
            .body(Bytes::new())
            .unwrap()
            .into();
        assert!(req.is_json());
    }

    #[test]
    fn test_query() {
        let req: ExtendedRequest =
            build("https://worker.example.com/search?q=hello%20world&page=2&q=again")
                .body(Bytes::new())
                .unwrap()
                .into();

        assert_eq!(req.query().len(), 3);
        assert_eq!(req.query_param("q"), Some("hello world".to_string()));
        assert_eq!(req.query_param("page"), Some("2".to_string()));
        assert!(req.query_param("missing").is_none());
        assert_eq!(req.path(), "/search");
    }

    #[test]
    fn test_body_decoding() {
        #[derive(Deserialize)]
        struct Greeting {
            hello: String,
        }

        let req: ExtendedRequest = build("/")
            .method("POST")
            .body(Bytes::from_static(br#"{"hello":"world"}"#))
            .unwrap()
            .into();

        assert_eq!(req.method(), http::Method::POST);
        assert_eq!(req.text().unwrap(), r#"{"hello":"world"}"#);
        let greeting: Greeting = req.json().unwrap();
        assert_eq!(greeting.hello, "world");
    }

    #[test]
    fn test_invalid_body() {
        let req: ExtendedRequest = build("/")
            .body(Bytes::from_static(&[0xff, 0xfe]))
            .unwrap()
            .into();

        assert!(req.text().is_err());
        assert!(req.json::<serde_json::Value>().is_err());
    }
}
