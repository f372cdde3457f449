//! Minimal HTTP layer the catalog API is served through.
//!
//! hyper owns the wire. This module owns the parts that change between
//! applications:
//!
//! - Radix-tree routing with shared state, via [`matchit`]
//! - Buffered [`Request`] / [`Response`] types and [`IntoResponse`]
//! - Graceful shutdown on SIGTERM / Ctrl-C, draining in-flight requests
//! - One tracing span per request

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;
mod trace;

pub mod health;

pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
