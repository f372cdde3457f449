//! API Errors
//!
//! One error type for every JSON endpoint, rendered the same way everywhere:
//! a `detail` message for request-level problems, a field map for
//! validation failures.

use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::http::{IntoResponse, Response, Status};
use crate::products::{ProductsServiceError, validation::ValidationErrors};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("JSON parse error - {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("invalid payload: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("not found")]
    NotFound,
}

impl From<ProductsServiceError> for ApiError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::NotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        debug!("request rejected: {detail}");

        match self {
            Self::MalformedJson(_) => Response::builder()
                .status(Status::BadRequest)
                .json_of(&json!({ "detail": detail })),
            Self::Invalid(errors) => Response::builder()
                .status(Status::BadRequest)
                .json_of(&errors),
            Self::NotFound => Response::builder()
                .status(Status::NotFound)
                .json_of(&json!({ "detail": "Not found." })),
        }
    }
}
