//! End-to-end: the real server on an ephemeral port, driven over HTTP.

use catalog::{
    app,
    client::CatalogClient,
    http::Server,
    products::models::{ContentPolicy, DiscountPolicy},
    state::AppState,
};
use serde_json::{Value, json};
use testresult::TestResult;
use tokio::sync::oneshot;

async fn spawn_server(
    content: ContentPolicy,
    discount: DiscountPolicy,
) -> TestResult<(CatalogClient, oneshot::Sender<()>, tokio::task::JoinHandle<()>)> {
    let server = Server::bind("127.0.0.1:0").await?;
    let addr = server.local_addr()?;
    let (stop, stopped) = oneshot::channel::<()>();

    let router = app::router(AppState::in_memory(content, discount));
    let handle = tokio::spawn(async move {
        let shutdown = async {
            _ = stopped.await;
        };
        if let Err(e) = server.serve_with_shutdown(router, shutdown).await {
            panic!("server failed: {e}");
        }
    });

    Ok((CatalogClient::new(&format!("http://{addr}/api/")), stop, handle))
}

#[tokio::test]
async fn product_crud_over_http() -> TestResult {
    let (client, stop, handle) =
        spawn_server(ContentPolicy::Title, DiscountPolicy::SalePrice).await?;

    let created = client.create(&json!({ "title": "Book" })).await?;
    assert_eq!(created.status, 201);
    assert_eq!(
        created.body,
        json!({
            "id": 1,
            "title": "Book",
            "content": "Book",
            "price": "99.99",
            "sale_price": "79.99",
            "my_discount": "79.99",
        })
    );

    let fetched = client.get(1).await?;
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.body, created.body);

    let replaced = client
        .update(1, &json!({ "title": "Atlas", "price": "10" }), true)
        .await?;
    assert_eq!(replaced.status, 200);
    assert_eq!(replaced.body["price"], "10.00");
    assert_eq!(replaced.body["sale_price"], "8.00");

    let patched = client.update(1, &json!({ "content": "" }), false).await?;
    assert_eq!(patched.body["content"], "Atlas");

    let rejected = client.update(1, &json!({ "price": "x" }), true).await?;
    assert_eq!(rejected.status, 400);
    assert!(rejected.body["title"].is_array());
    assert!(rejected.body["price"].is_array());

    let listed = client.list().await?;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));

    let deleted = client.delete(1).await?;
    assert_eq!(deleted.status, 204);
    assert_eq!(deleted.body, Value::Null);

    let missing = client.get(1).await?;
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body, json!({ "detail": "Not found." }));

    _ = stop.send(());
    handle.await?;

    Ok(())
}

#[tokio::test]
async fn placeholder_and_percentage_policies() -> TestResult {
    let (client, stop, handle) = spawn_server(
        ContentPolicy::Placeholder("No description provided.".to_owned()),
        DiscountPolicy::Percentage,
    )
    .await?;

    let created = client
        .create(&json!({ "title": "Lamp", "price": 50 }))
        .await?;

    assert_eq!(created.status, 201);
    assert_eq!(created.body["content"], "No description provided.");
    assert_eq!(created.body["my_discount"], json!(10.0));

    _ = stop.send(());
    handle.await?;

    Ok(())
}

#[tokio::test]
async fn echo_returns_body_and_content_type() -> TestResult {
    let (client, stop, handle) =
        spawn_server(ContentPolicy::Title, DiscountPolicy::SalePrice).await?;

    let params = [("abc".to_owned(), "123".to_owned())];
    let echoed = client.echo(&params, Some(&json!({ "query": "Hello" }))).await?;

    assert_eq!(echoed.status, 200);
    assert_eq!(
        echoed.body,
        json!({ "query": "Hello", "content_type": "application/json" })
    );

    _ = stop.send(());
    handle.await?;

    Ok(())
}
