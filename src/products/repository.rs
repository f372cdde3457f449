//! Products Repository
//!
//! Process-local product storage. Every method takes the lock once, so each
//! call is atomic with respect to the others.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::products::models::{NewProduct, Product, ProductId};

#[derive(Debug, Default)]
pub struct InMemoryProductsRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: u64,
    products: BTreeMap<ProductId, Product>,
}

impl InMemoryProductsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All products in ascending id order.
    pub async fn list_products(&self) -> Vec<Product> {
        self.inner.read().await.products.values().cloned().collect()
    }

    pub async fn get_product(&self, product: ProductId) -> Option<Product> {
        self.inner.read().await.products.get(&product).cloned()
    }

    /// Stores `product` under the next free id. Ids are never reused.
    pub async fn create_product(&self, product: NewProduct) -> Product {
        let mut inner = self.inner.write().await;

        inner.last_id += 1;
        let id = ProductId::new(inner.last_id);

        let created = Product {
            id,
            title: product.title,
            content: product.content,
            price: product.price,
        };

        inner.products.insert(id, created.clone());

        created
    }

    /// Applies `change` to the stored product and returns the result, or
    /// `None` when there is no such product.
    pub async fn update_product<F>(&self, product: ProductId, change: F) -> Option<Product>
    where
        F: FnOnce(&mut Product) + Send,
    {
        let mut inner = self.inner.write().await;
        let stored = inner.products.get_mut(&product)?;

        change(stored);

        Some(stored.clone())
    }

    /// Returns whether a product was removed.
    pub async fn delete_product(&self, product: ProductId) -> bool {
        self.inner.write().await.products.remove(&product).is_some()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn new_product(title: &str) -> NewProduct {
        NewProduct {
            title: title.to_owned(),
            content: None,
            price: Decimal::new(100, 2),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let repo = InMemoryProductsRepository::new();

        let a = repo.create_product(new_product("a")).await;
        let b = repo.create_product(new_product("b")).await;
        assert!(repo.delete_product(b.id).await);
        let c = repo.create_product(new_product("c")).await;

        assert_eq!(a.id, ProductId::new(1));
        assert_eq!(b.id, ProductId::new(2));
        assert_eq!(c.id, ProductId::new(3));
    }

    #[tokio::test]
    async fn lists_in_id_order() {
        let repo = InMemoryProductsRepository::new();

        for title in ["c", "a", "b"] {
            repo.create_product(new_product(title)).await;
        }

        let titles: Vec<_> = repo.list_products().await.into_iter().map(|p| p.title).collect();

        assert_eq!(titles, ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn update_missing_product_returns_none() {
        let repo = InMemoryProductsRepository::new();

        let updated = repo.update_product(ProductId::new(9), |p| p.title.clear()).await;

        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn update_persists_the_change() {
        let repo = InMemoryProductsRepository::new();
        let created = repo.create_product(new_product("a")).await;

        let updated = repo
            .update_product(created.id, |p| p.title = "z".to_owned())
            .await;

        assert_eq!(updated.map(|p| p.title), Some("z".to_owned()));
        assert_eq!(repo.get_product(created.id).await.map(|p| p.title), Some("z".to_owned()));
    }

    #[tokio::test]
    async fn delete_removes_the_product() {
        let repo = InMemoryProductsRepository::new();
        let created = repo.create_product(new_product("a")).await;

        assert!(repo.delete_product(created.id).await);
        assert!(!repo.delete_product(created.id).await);
        assert!(repo.get_product(created.id).await.is_none());
    }
}
