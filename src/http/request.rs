//! Request identification and access logging.
//!
//! # Responsibilities
//! - Generate a correlation id (UUID v4) per request
//! - Expose it as `x-request-id` on the request and the response
//! - Emit one "Incoming Request" log line per request
//!
//! # Design Decisions
//! - An id supplied by the caller is kept, so a balancer can correlate
//! - The access log runs inside the id layer and always sees an id

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::server::AppState;

/// Header carrying the correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Produces a fresh UUID v4 for every request without an id.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeCorrelationId;

impl MakeRequestId for MakeCorrelationId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Correlation id of a request, or `"unknown"` when missing.
pub fn correlation_id(request: &Request) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Access log middleware.
pub async fn access_log(State(state): State<AppState>, request: Request, next: Next) -> Response {
    tracing::info!(
        host = %state.coordinator.host(),
        uri = %request.uri().path(),
        method = %request.method(),
        correlation_id = %correlation_id(&request),
        "Incoming Request"
    );

    next.run(request).await
}
