//! HTTP router configuration.
//!
//! This module builds the Axum router: a single fallback route feeding
//! every request to the route table, wrapped in the usual middleware.

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handler::handle_fetch;
use crate::state::AppState;

/// Build the main application router.
///
/// Path and method matching is left entirely to the route table, so the
/// axum router has no routes of its own. No layer answers requests itself:
/// CORS preflights are `OPTIONS` requests like any other and reach the
/// route's catch-all handler.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .fallback(handle_fetch)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;
    use wkrk_common::{ErrorFormat, RouterConfig};
    use wkrk_core::{HandlerParams, MethodSlots, RouteEntry, RouteTable, Wkrk, sync};

    use crate::context::{Env, ExecutionContext};

    type Params = HandlerParams<Env, ExecutionContext>;

    fn setup_router(config: RouterConfig) -> Router {
        let routes = RouteTable::new()
            .route(
                "/",
                RouteEntry::new()
                    .get(sync(|p: Params| Ok(p.res.send("Hello world!"))))
                    .with_default(MethodSlots::new().post(sync(|p: Params| {
                        Ok(p.res.json(&serde_json::json!({ "hello": "world" }))?)
                    }))),
            )
            .route(
                "/cors",
                RouteEntry::new().handler(sync(|p: Params| {
                    Ok(p.res.text(format!("catch-all {}", p.req.method())))
                })),
            )
            .route(
                "/env",
                RouteEntry::new().handler(|p: Params| async move {
                    let greeting = p.env.var("GREETING").unwrap_or("none").to_owned();
                    Ok(p.res.text(format!("{greeting} {}", p.ctx.request_id.len())))
                }),
            );

        let env: Env = [("GREETING", "hello")].into_iter().collect();
        let state = AppState::new(Wkrk::with_config(routes, config), env, 1024);
        build_router(state, Duration::from_secs(30))
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_get_route() {
        let app = setup_router(RouterConfig::default());
        let (status, body) = send(app, "GET", "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Hello world!");
    }

    #[tokio::test]
    async fn test_default_slot_route() {
        let app = setup_router(RouterConfig::default());
        let (status, body) = send(app, "POST", "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"hello":"world"}"#);
    }

    #[tokio::test]
    async fn test_env_and_context() {
        let app = setup_router(RouterConfig::default());
        let (status, body) = send(app, "PATCH", "/env").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hello 36");
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let app = setup_router(RouterConfig::default());
        let (status, body) = send(app, "GET", "/nonexistent").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            "Don't know how to handle the /nonexistent path. Check your routes configuration."
        );
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let app = setup_router(RouterConfig::default());
        let (status, body) = send(app, "DELETE", "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Unknown request method: DELETE");
    }

    #[tokio::test]
    async fn test_json_error_format() {
        let app = setup_router(RouterConfig {
            error_format: ErrorFormat::Json,
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "error": "Unknown request method: PUT" })
        );
    }

    fn preflight(uri: &str) -> Request<Body> {
        Request::builder()
            .method("OPTIONS")
            .uri(uri)
            .header("origin", "https://app.example.com")
            .header("access-control-request-method", "PUT")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_preflight_reaches_catch_all() {
        let app = setup_router(RouterConfig::default());
        let response = app.oneshot(preflight("/cors")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), b"catch-all OPTIONS");
    }

    #[tokio::test]
    async fn test_preflight_to_unknown_path() {
        let app = setup_router(RouterConfig::default());
        let response = app.oneshot(preflight("/missing")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            body.as_ref(),
            b"Don't know how to handle the /missing path. Check your routes configuration."
        );
    }

    #[tokio::test]
    async fn test_preflight_without_catch_all() {
        let app = setup_router(RouterConfig::default());
        let response = app.oneshot(preflight("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), b"Unknown request method: OPTIONS");
    }
}
