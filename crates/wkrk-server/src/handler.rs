//! Request handler bridging axum to the route table.
//!
//! Every inbound request lands here: the body is buffered, a fresh
//! [`ExecutionContext`] is created and the request is handed to `fetch`.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{Response, StatusCode};
use tracing::{error, info, instrument, warn};

use crate::context::ExecutionContext;
use crate::request::{RequestBodyError, buffer_request};
use crate::response::{host_response, into_axum_response};
use crate::state::AppState;

/// Dispatch an HTTP request through the route table.
///
/// Handler failures are answered with a generic 500; the error itself is
/// only logged.
#[instrument(skip_all, fields(method = %req.method(), path = %req.uri().path()))]
pub async fn handle_fetch(State(state): State<AppState>, req: Request) -> Response<Body> {
    let ctx = ExecutionContext::new();
    let request_id = ctx.request_id.clone();

    let request = match buffer_request(req, state.max_body_bytes()).await {
        Ok(r) => r,
        Err(e @ RequestBodyError::TooLarge { .. }) => {
            warn!(request_id = %request_id, error = %e, "Rejected request body");
            return host_response(StatusCode::PAYLOAD_TOO_LARGE, &e.to_string());
        }
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "Failed to read request");
            return host_response(StatusCode::BAD_REQUEST, "Bad request");
        }
    };

    match state
        .app()
        .fetch(request, state.env().clone(), ctx.clone())
        .await
    {
        Ok(resp) => {
            info!(
                request_id = %request_id,
                status = resp.status().as_u16(),
                duration_ms = ctx.elapsed().as_millis(),
                "Request completed"
            );
            into_axum_response(resp)
        }
        Err(e) => {
            error!(
                request_id = %request_id,
                error = %e,
                duration_ms = ctx.elapsed().as_millis(),
                "Handler failed"
            );
            host_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
