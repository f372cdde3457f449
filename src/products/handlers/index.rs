//! Product Index Handler

use std::sync::Arc;

use crate::{
    errors::ApiError,
    http::{Json, Request},
    products::handlers::ProductResponse,
    state::AppState,
};

/// `GET /api/`: every product, in id order.
pub(crate) async fn handler(
    state: Arc<AppState>,
    _req: Request,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.products.list_products().await?;

    Ok(Json(
        products
            .iter()
            .map(|product| ProductResponse::new(product, state.discount))
            .collect(),
    ))
}
