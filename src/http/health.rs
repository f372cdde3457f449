//! Built-in health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the process serve traffic? Failure → pulled from the load-balancer. |
//!
//! Both are generic over the router state, so they register on any router:
//!
//! ```rust
//! use catalog::http::{Method, Router, health};
//!
//! let app = Router::new(())
//!     .on(Method::Get, "/healthz", health::liveness)
//!     .on(Method::Get, "/readyz", health::readiness);
//! ```

use crate::http::{Request, Response};

/// Liveness probe handler.
///
/// Always returns `200 OK` with body `"ok"`. If the process can respond to
/// HTTP at all, it is alive.
pub async fn liveness<S>(_state: S, _req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe handler.
///
/// Returns `200 OK` with body `"ready"`. The in-process product store has
/// no warm-up, so the catalog is ready as soon as it is listening.
pub async fn readiness<S>(_state: S, _req: Request) -> Response {
    Response::text("ready")
}
