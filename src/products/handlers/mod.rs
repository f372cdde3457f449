//! Product Handlers

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::{
    errors::ApiError,
    http::Request,
    products::models::{DiscountPolicy, Product, ProductId},
};

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// Serialized product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: u64,
    pub title: String,
    pub content: Option<String>,
    /// Two decimal places, e.g. `"99.99"`.
    pub price: String,
    /// 80% of `price`, two decimal places.
    pub sale_price: String,
    /// Formatted sale price or numeric 20% of price, per [`DiscountPolicy`].
    pub my_discount: Value,
}

impl ProductResponse {
    pub fn new(product: &Product, discount: DiscountPolicy) -> Self {
        let sale_price = format!("{:.2}", product.sale_price());

        let my_discount = match discount {
            DiscountPolicy::SalePrice => Value::String(sale_price.clone()),
            DiscountPolicy::Percentage => product
                .discount()
                .to_f64()
                .and_then(Number::from_f64)
                .map_or(Value::Null, Value::Number),
        };

        Self {
            id: product.id.get(),
            title: product.title.clone(),
            content: product.content.clone(),
            price: format!("{:.2}", product.price),
            sale_price,
            my_discount,
        }
    }
}

/// The `{pk}` path parameter. Anything that is not an id cannot name a
/// product, so it is reported as not found.
fn product_id(req: &Request) -> Result<ProductId, ApiError> {
    req.param("pk")
        .and_then(|pk| pk.parse().ok())
        .ok_or(ApiError::NotFound)
}

/// The JSON body, with an empty body read as an empty object.
fn payload(req: &Request) -> Result<Value, ApiError> {
    if req.body().iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    Ok(req.json()?)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::{
        http::{Method, Router},
        products::{ProductsServiceError, service::MockProductsService},
        state::AppState,
    };

    use super::*;

    pub(crate) fn make_product(id: u64) -> Product {
        Product {
            id: ProductId::new(id),
            title: "Book".to_owned(),
            content: Some("Book".to_owned()),
            price: Decimal::new(9999, 2),
        }
    }

    /// A mock that fails the test on any call not explicitly expected.
    pub(crate) fn strict_mock() -> MockProductsService {
        MockProductsService::new()
    }

    pub(crate) fn router_with(
        products: MockProductsService,
        discount: DiscountPolicy,
    ) -> Router<Arc<AppState>> {
        crate::app::router(AppState::new(Arc::new(products), discount))
    }

    pub(crate) fn router(products: MockProductsService) -> Router<Arc<AppState>> {
        router_with(products, DiscountPolicy::SalePrice)
    }

    pub(crate) fn json_body(res: &crate::http::Response) -> Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[test]
    fn serializes_with_sale_price_discount() {
        let response = ProductResponse::new(&make_product(1), DiscountPolicy::SalePrice);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "id": 1,
                "title": "Book",
                "content": "Book",
                "price": "99.99",
                "sale_price": "79.99",
                "my_discount": "79.99",
            })
        );
    }

    #[test]
    fn serializes_with_percentage_discount() {
        let response = ProductResponse::new(&make_product(1), DiscountPolicy::Percentage);

        assert_eq!(response.my_discount, json!(20.0));
    }

    #[test]
    fn pads_prices_to_two_decimals() {
        let mut product = make_product(1);
        product.price = Decimal::new(10, 0);

        let response = ProductResponse::new(&product, DiscountPolicy::SalePrice);

        assert_eq!(response.price, "10.00");
        assert_eq!(response.sale_price, "8.00");
    }

    #[tokio::test]
    async fn non_integer_pk_is_404_without_calling_the_service() {
        let res = router(strict_mock())
            .dispatch(Request::new(Method::Get, "/api/abc/"))
            .await;

        assert_eq!(res.status_code(), crate::http::Status::NotFound);
    }

    #[tokio::test]
    async fn service_is_called_with_parsed_pk() {
        let mut products = strict_mock();
        products
            .expect_get_product()
            .with(eq(ProductId::new(12)))
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = router(products)
            .dispatch(Request::new(Method::Get, "/api/12"))
            .await;

        assert_eq!(res.status_code(), crate::http::Status::NotFound);
    }
}
