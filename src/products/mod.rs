//! Products

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

pub use service::{CatalogProductsService, ProductsService, ProductsServiceError};
