//! State

use std::sync::Arc;

use crate::products::{
    CatalogProductsService, ProductsService,
    models::{ContentPolicy, DiscountPolicy},
};

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductsService>,
    pub discount: DiscountPolicy,
}

impl AppState {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>, discount: DiscountPolicy) -> Arc<Self> {
        Arc::new(Self { products, discount })
    }

    /// State backed by a fresh, empty in-memory catalog.
    #[must_use]
    pub fn in_memory(content: ContentPolicy, discount: DiscountPolicy) -> Arc<Self> {
        Self::new(Arc::new(CatalogProductsService::new(content)), discount)
    }
}
