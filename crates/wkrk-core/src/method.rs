//! Request method classification.

/// Method tag used to pick a slot in a route entry.
///
/// Only the four named methods have dedicated slots. Every other method
/// (`PATCH`, `OPTIONS`, `HEAD`, extension methods) is [`RouteMethod::Other`]
/// and can only be served by an entry's catch-all handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMethod {
    Get,
    Post,
    Put,
    Delete,
    /// Any other method, lower-cased.
    Other(String),
}

impl RouteMethod {
    /// Classify a request method string, ignoring case.
    pub fn parse(method: &str) -> Self {
        let lower = method.to_ascii_lowercase();
        match lower.as_str() {
            "get" => Self::Get,
            "post" => Self::Post,
            "put" => Self::Put,
            "delete" => Self::Delete,
            _ => Self::Other(lower),
        }
    }

    /// Returns `true` for `get`, `post`, `put` and `delete`.
    pub fn is_named(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Lower-case name of the method.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Other(name) => name,
        }
    }
}

impl From<&http::Method> for RouteMethod {
    fn from(method: &http::Method) -> Self {
        Self::parse(method.as_str())
    }
}

impl std::fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_methods() {
        assert_eq!(RouteMethod::parse("GET"), RouteMethod::Get);
        assert_eq!(RouteMethod::parse("post"), RouteMethod::Post);
        assert_eq!(RouteMethod::parse("Put"), RouteMethod::Put);
        assert_eq!(RouteMethod::parse("DELETE"), RouteMethod::Delete);
    }

    #[test]
    fn test_parse_other_methods() {
        let method = RouteMethod::parse("PATCH");
        assert_eq!(method, RouteMethod::Other("patch".to_string()));
        assert!(!method.is_named());
        assert_eq!(method.as_str(), "patch");

        assert!(!RouteMethod::parse("OPTIONS").is_named());
        assert!(!RouteMethod::parse("HEAD").is_named());
    }

    #[test]
    fn test_from_http_method() {
        assert_eq!(RouteMethod::from(&http::Method::DELETE), RouteMethod::Delete);
        assert_eq!(
            RouteMethod::from(&http::Method::OPTIONS),
            RouteMethod::Other("options".to_string())
        );
    }
}
