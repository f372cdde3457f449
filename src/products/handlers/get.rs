//! Get Product Handler

use std::sync::Arc;

use crate::{
    errors::ApiError,
    http::{Json, Request},
    products::handlers::{ProductResponse, product_id},
    state::AppState,
};

/// `GET /api/{pk}/`
pub(crate) async fn handler(
    state: Arc<AppState>,
    req: Request,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.products.get_product(product_id(&req)?).await?;

    Ok(Json(ProductResponse::new(&product, state.discount)))
}
