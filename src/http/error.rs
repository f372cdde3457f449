//! Server error type.

use thiserror::Error;

/// Infrastructure failures: binding to a port or reading the bound address.
///
/// Application-level errors (400, 404, etc.) are expressed as HTTP
/// [`Response`](crate::http::Response) values, not as `Error`s.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
