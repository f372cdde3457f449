//! Routes

use std::sync::Arc;

use crate::{
    echo,
    http::{Method, Router, health},
    products::handlers::{create, delete, get, index, update},
    state::AppState,
};

/// Every route the catalog serves, bound to `state`.
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new(state)
        .on(Method::Get, "/healthz", health::liveness::<Arc<AppState>>)
        .on(Method::Get, "/readyz", health::readiness::<Arc<AppState>>)
        .on(Method::Get, "/api/", index::handler)
        .on(Method::Post, "/api/", create::handler)
        .on(Method::Get, "/api/echo/", echo::handler::<Arc<AppState>>)
        .on(Method::Post, "/api/echo/", echo::handler::<Arc<AppState>>)
        .on(Method::Get, "/api/{pk}/", get::handler)
        .on(Method::Put, "/api/{pk}/update/", update::replace)
        .on(Method::Patch, "/api/{pk}/update/", update::partial)
        .on(Method::Delete, "/api/{pk}/delete/", delete::handler)
}
