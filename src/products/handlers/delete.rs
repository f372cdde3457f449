//! Delete Product Handler

use std::sync::Arc;

use crate::{
    errors::ApiError,
    http::{Request, Status},
    products::handlers::product_id,
    state::AppState,
};

/// `DELETE /api/{pk}/delete/`: `204` with no body.
pub(crate) async fn handler(state: Arc<AppState>, req: Request) -> Result<Status, ApiError> {
    state.products.delete_product(product_id(&req)?).await?;

    Ok(Status::NoContent)
}
