//! Per-request tracing.
//!
//! Every request runs inside a `request` span carrying its method and path.
//! When the response is ready a single line is logged with the status and
//! latency: `info` for success and client errors, `error` for 5xx.

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, error, field, info, info_span};

use crate::http::response::Response;

pub(crate) async fn traced<F>(method: &str, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("request", method, path, status = field::Empty);
    let started = Instant::now();

    let response = fut.instrument(span.clone()).await;

    let status = response.status_code();
    let latency_ms = started.elapsed().as_secs_f64() * 1_000.0;
    span.record("status", status.as_u16());

    let _entered = span.enter();
    if status.is_server_error() {
        error!(latency_ms, "request failed");
    } else {
        info!(latency_ms, "request completed");
    }

    response
}
