//! Default middleware stack.
//!
//! Outermost first:
//! ```text
//! SetRequestId → Trace (access log) → PropagateRequestId
//!     → metrics → CatchPanic → Timeout → handler
//! ```

use std::time::Duration;

use axum::{body::Body, http::Request, middleware::from_fn, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::http::request::{request_id_header, RequestIdExt};
use crate::observability::metrics;

/// Wrap every route of `router` with the default middleware.
#[allow(deprecated)]
pub fn apply_defaults(router: Router, request_timeout: Duration) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = request.request_id().unwrap_or("-"),
            )
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    router
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CatchPanicLayer::new())
        .layer(from_fn(metrics::track_requests))
        .layer(PropagateRequestIdLayer::new(request_id_header()))
        .layer(trace)
        .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
}
