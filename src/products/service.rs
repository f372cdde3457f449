//! Products service.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::{debug, info};

use crate::products::{
    models::{ContentPolicy, NewProduct, Product, ProductId, ProductUpdate},
    repository::InMemoryProductsRepository,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieves a single product.
    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError>;

    /// Creates a product, filling in missing content.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Applies `update` to a product, refilling its content if it ends up empty.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;
}

/// [`ProductsService`] over the in-memory repository, applying a
/// [`ContentPolicy`] whenever a product is written.
#[derive(Debug)]
pub struct CatalogProductsService {
    repository: InMemoryProductsRepository,
    content_policy: ContentPolicy,
}

impl CatalogProductsService {
    #[must_use]
    pub fn new(content_policy: ContentPolicy) -> Self {
        Self {
            repository: InMemoryProductsRepository::new(),
            content_policy,
        }
    }
}

#[async_trait]
impl ProductsService for CatalogProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(self.repository.list_products().await)
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError> {
        self.repository
            .get_product(product)
            .await
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(&self, mut product: NewProduct) -> Result<Product, ProductsServiceError> {
        if product.content.as_deref().is_none_or(str::is_empty) {
            debug!(title = %product.title, "filling missing content");
            product.content = Some(self.content_policy.content_for(&product.title));
        }

        let created = self.repository.create_product(product).await;

        info!(product_id = %created.id, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let policy = &self.content_policy;

        let updated = self
            .repository
            .update_product(product, |stored| {
                stored.apply(update);
                if !stored.has_content() {
                    stored.content = Some(policy.content_for(&stored.title));
                }
            })
            .await
            .ok_or(ProductsServiceError::NotFound)?;

        info!(product_id = %updated.id, "updated product");

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        if !self.repository.delete_product(product).await {
            return Err(ProductsServiceError::NotFound);
        }

        info!(product_id = %product, "deleted product");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::products::models::default_price;

    use super::*;

    fn book() -> NewProduct {
        NewProduct {
            title: "Book".to_owned(),
            content: None,
            price: default_price(),
        }
    }

    #[tokio::test]
    async fn create_fills_content_with_title() -> TestResult {
        let service = CatalogProductsService::new(ContentPolicy::Title);

        let created = service.create_product(book()).await?;

        assert_eq!(created.content.as_deref(), Some("Book"));
        assert_eq!(created.price.to_string(), "99.99");
        assert_eq!(created.sale_price().to_string(), "79.99");

        Ok(())
    }

    #[tokio::test]
    async fn create_fills_empty_content_with_placeholder() -> TestResult {
        let service = CatalogProductsService::new(ContentPolicy::Placeholder("n/a".to_owned()));

        let created = service
            .create_product(NewProduct { content: Some(String::new()), ..book() })
            .await?;

        assert_eq!(created.content.as_deref(), Some("n/a"));

        Ok(())
    }

    #[tokio::test]
    async fn create_keeps_given_content() -> TestResult {
        let service = CatalogProductsService::new(ContentPolicy::Title);

        let created = service
            .create_product(NewProduct { content: Some("A novel".to_owned()), ..book() })
            .await?;

        assert_eq!(created.content.as_deref(), Some("A novel"));

        Ok(())
    }

    #[tokio::test]
    async fn get_missing_product_is_not_found() {
        let service = CatalogProductsService::new(ContentPolicy::Title);

        let result = service.get_product(ProductId::new(1)).await;

        assert_eq!(result, Err(ProductsServiceError::NotFound));
    }

    #[tokio::test]
    async fn update_to_empty_content_reapplies_policy() -> TestResult {
        let service = CatalogProductsService::new(ContentPolicy::Title);
        let created = service
            .create_product(NewProduct { content: Some("A novel".to_owned()), ..book() })
            .await?;

        let update = ProductUpdate {
            title: Some("Atlas".to_owned()),
            content: Some(Some(String::new())),
            price: None,
        };
        let updated = service.update_product(created.id, update).await?;

        assert_eq!(updated.title, "Atlas");
        assert_eq!(updated.content.as_deref(), Some("Atlas"));
        assert_eq!(service.get_product(created.id).await?, updated);

        Ok(())
    }

    #[tokio::test]
    async fn update_changes_price() -> TestResult {
        let service = CatalogProductsService::new(ContentPolicy::Title);
        let created = service.create_product(book()).await?;

        let update = ProductUpdate { price: Some(Decimal::new(1000, 2)), ..Default::default() };
        let updated = service.update_product(created.id, update).await?;

        assert_eq!(updated.price.to_string(), "10.00");
        assert_eq!(updated.content.as_deref(), Some("Book"));

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() {
        let service = CatalogProductsService::new(ContentPolicy::Title);

        let result = service
            .update_product(ProductId::new(3), ProductUpdate::default())
            .await;

        assert_eq!(result, Err(ProductsServiceError::NotFound));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> TestResult {
        let service = CatalogProductsService::new(ContentPolicy::Title);
        let created = service.create_product(book()).await?;

        service.delete_product(created.id).await?;

        assert_eq!(service.get_product(created.id).await, Err(ProductsServiceError::NotFound));
        assert_eq!(service.delete_product(created.id).await, Err(ProductsServiceError::NotFound));
        assert!(service.list_products().await?.is_empty());

        Ok(())
    }
}
