//! Create Product Handler

use std::sync::Arc;

use crate::{
    errors::ApiError,
    http::{Request, Response, Status},
    products::{
        handlers::{ProductResponse, payload},
        validation,
    },
    state::AppState,
};

/// `POST /api/`: `201` with the created product and its location.
pub(crate) async fn handler(state: Arc<AppState>, req: Request) -> Result<Response, ApiError> {
    let new = validation::new_product(&payload(&req)?)?;

    let product = state.products.create_product(new).await?;

    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &format!("/api/{}/", product.id))
        .json_of(&ProductResponse::new(&product, state.discount)))
}
