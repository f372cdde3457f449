//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Every handler receives a
//! clone of the router's state alongside the request.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::http::handler::{BoxedHandler, Handler};
use crate::http::method::Method;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::status::Status;

/// The application router.
///
/// Build it once at startup with the shared state, then pass it to
/// [`Server::serve`](crate::http::Server::serve). Each [`Router::on`] call
/// returns `self` so registrations chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

/// Outcome of matching a method + path pair.
enum Lookup<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl<S: Clone + Send + Sync + 'static> Router<S> {
    pub fn new(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and `req.param("name")` retrieves
    /// them:
    ///
    /// ```rust
    /// # use catalog::http::{Method, Request, Response, Router};
    /// # async fn get_product(_: (), _: Request) -> Response { Response::text("") }
    /// # async fn create_product(_: (), _: Request) -> Response { Response::text("") }
    /// Router::new(())
    ///     .on(Method::Get,  "/api/{pk}/", get_product)
    ///     .on(Method::Post, "/api/",      create_product);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    /// Routes one request and produces one response.
    ///
    /// Unknown paths answer `404`; known paths registered under other methods
    /// answer `405` with an `allow` header.
    pub async fn dispatch(&self, mut req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Lookup::Found(handler, params) => {
                req.set_params(params);
                handler.call(self.state.clone(), req).await
            }
            Lookup::MethodNotAllowed(allowed) => method_not_allowed(&allowed),
            Lookup::NotFound => Response::status(Status::NotFound),
        }
    }

    /// Methods with a route matching `path`, in wire-name order.
    pub fn allowed(&self, path: &str) -> Vec<Method> {
        let candidates = path_candidates(path);

        Method::ALL.into_iter()
            .filter(|m| {
                self.routes.get(m).is_some_and(|tree| {
                    candidates.iter().any(|candidate| tree.at(candidate).is_ok())
                })
            })
            .collect()
    }

    /// Answer for a method no route can be registered under: `405` with an
    /// `allow` header when `path` exists, `404` otherwise.
    pub(crate) fn reject_method(&self, path: &str) -> Response {
        let allowed = self.allowed(path);

        if allowed.is_empty() { Response::status(Status::NotFound) } else { method_not_allowed(&allowed) }
    }

    fn lookup(&self, method: Method, path: &str) -> Lookup<S> {
        let candidates = path_candidates(path);

        if let Some(tree) = self.routes.get(&method) {
            for candidate in &candidates {
                if let Ok(matched) = tree.at(candidate) {
                    let handler = Arc::clone(matched.value);
                    let params = matched.params.iter()
                        .map(|(k, v)| (k.to_owned(), v.to_owned()))
                        .collect();
                    return Lookup::Found(handler, params);
                }
            }
        }

        let allowed = self.allowed(path);

        if allowed.is_empty() { Lookup::NotFound } else { Lookup::MethodNotAllowed(allowed) }
    }
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");

    Response::builder()
        .status(Status::MethodNotAllowed)
        .header("allow", &allow)
        .no_body()
}

/// The path as given, then with its trailing slash toggled.
fn path_candidates(path: &str) -> Vec<String> {
    let alternate = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_owned(),
        Some(_) => return vec![path.to_owned()],
        None => format!("{path}/"),
    };
    vec![path.to_owned(), alternate]
}
