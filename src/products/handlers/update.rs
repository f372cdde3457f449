//! Update Product Handlers

use std::sync::Arc;

use crate::{
    errors::ApiError,
    http::{Json, Request},
    products::{
        handlers::{ProductResponse, payload, product_id},
        validation::{self, UpdateMode},
    },
    state::AppState,
};

/// `PUT /api/{pk}/update/`: `title` must be present.
pub(crate) async fn replace(
    state: Arc<AppState>,
    req: Request,
) -> Result<Json<ProductResponse>, ApiError> {
    update(&state, &req, UpdateMode::Full).await
}

/// `PATCH /api/{pk}/update/`: only the fields given change.
pub(crate) async fn partial(
    state: Arc<AppState>,
    req: Request,
) -> Result<Json<ProductResponse>, ApiError> {
    update(&state, &req, UpdateMode::Partial).await
}

#[tracing::instrument(name = "products.update", skip(state, req), fields(pk = req.param("pk")))]
async fn update(
    state: &AppState,
    req: &Request,
    mode: UpdateMode,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = product_id(req)?;
    let update = validation::product_update(&payload(req)?, mode)?;

    let updated = state.products.update_product(product, update).await?;

    Ok(Json(ProductResponse::new(&updated, state.discount)))
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::{
        http::{Method, Status},
        products::{
            ProductsServiceError,
            handlers::tests::{json_body, make_product, router, strict_mock},
            models::{ProductId, ProductUpdate},
        },
    };

    use super::*;

    fn request(method: Method, path: &str, body: &'static str) -> Request {
        Request::new(method, path).with_body(body)
    }

    #[tokio::test]
    async fn test_put_replaces_fields() {
        let mut products = strict_mock();
        products
            .expect_update_product()
            .with(
                eq(ProductId::new(1)),
                eq(ProductUpdate {
                    title: Some("Atlas".to_owned()),
                    content: None,
                    price: Some(Decimal::new(2000, 2)),
                }),
            )
            .once()
            .return_once(|_, _| {
                let mut product = make_product(1);
                product.title = "Atlas".to_owned();
                product.price = Decimal::new(2000, 2);
                Ok(product)
            });

        let res = router(products)
            .dispatch(request(Method::Put, "/api/1/update/", r#"{"title":"Atlas","price":20}"#))
            .await;

        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(json_body(&res)["title"], "Atlas");
        assert_eq!(json_body(&res)["price"], "20.00");
        assert_eq!(json_body(&res)["sale_price"], "16.00");
    }

    #[tokio::test]
    async fn test_put_without_title_returns_400() {
        let res = router(strict_mock())
            .dispatch(request(Method::Put, "/api/1/update/", r#"{"price":20}"#))
            .await;

        assert_eq!(res.status_code(), Status::BadRequest);
        assert_eq!(json_body(&res), json!({ "title": ["This field is required."] }));
    }

    #[tokio::test]
    async fn test_patch_forwards_only_given_fields() {
        let mut products = strict_mock();
        products
            .expect_update_product()
            .with(
                eq(ProductId::new(4)),
                eq(ProductUpdate { content: Some(Some(String::new())), ..Default::default() }),
            )
            .once()
            .return_once(|_, _| Ok(make_product(4)));

        let res = router(products)
            .dispatch(request(Method::Patch, "/api/4/update/", r#"{"content":""}"#))
            .await;

        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(json_body(&res)["content"], "Book");
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404() {
        let mut products = strict_mock();
        products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = router(products)
            .dispatch(request(Method::Patch, "/api/8/update/", r#"{"title":"x"}"#))
            .await;

        assert_eq!(res.status_code(), Status::NotFound);
    }

    #[tokio::test]
    async fn test_get_on_update_route_returns_405() {
        let res = router(strict_mock())
            .dispatch(Request::new(Method::Get, "/api/1/update/"))
            .await;

        assert_eq!(res.status_code(), Status::MethodNotAllowed);
        assert_eq!(res.header("allow"), Some("PATCH, PUT"));
    }
}
