mod common;

use axum_test::TestServer;
use serde_json::{Value, json};
use urlchemy::routes::router;

#[tokio::test]
async fn test_redirect_success() {
    let db = common::test_db().await;
    common::create_test_url(&db.pool, "ABCDE", "SECRT", "https://example.com/target").await;
    let server = TestServer::new(router(common::create_test_state(db.pool.clone()))).unwrap();

    let response = server.get("/ABCDE").await;

    assert_eq!(response.status_code(), 307);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_counts_clicks() {
    let db = common::test_db().await;
    common::create_test_url(&db.pool, "ABCDE", "SECRT", "https://example.com").await;
    let server = TestServer::new(router(common::create_test_state(db.pool.clone()))).unwrap();

    for _ in 0..3 {
        server.get("/ABCDE").await;
    }

    assert_eq!(common::clicks_of(&db.pool, "ABCDE").await, 3);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let db = common::test_db().await;
    let server = TestServer::new(router(common::create_test_state(db.pool.clone()))).unwrap();

    let response = server.get("/NOPE1").await;

    assert_eq!(response.status_code(), 404);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_inactive_not_found() {
    let db = common::test_db().await;
    common::create_inactive_url(&db.pool, "ABCDE", "SECRT", "https://example.com").await;
    let server = TestServer::new(router(common::create_test_state(db.pool.clone()))).unwrap();

    let response = server.get("/ABCDE").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(common::clicks_of(&db.pool, "ABCDE").await, 0);
}

#[tokio::test]
async fn test_redirect_secret_key_is_not_a_key() {
    let db = common::test_db().await;
    common::create_test_url(&db.pool, "ABCDE", "SECRT", "https://example.com").await;
    let server = TestServer::new(router(common::create_test_state(db.pool.clone()))).unwrap();

    let response = server.get("/SECRT").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_create_then_redirect() {
    let db = common::test_db().await;
    let server = TestServer::new(router(common::create_test_state(db.pool.clone()))).unwrap();

    let created = server
        .post("/url")
        .json(&json!({ "target_url": "https://example.com/?q=rust&lang=en" }))
        .await
        .json::<Value>();
    let short_url = created["shortened_url"]["url"].as_str().unwrap();
    let key = short_url.rsplit('/').next().unwrap();

    let response = server.get(&format!("/{key}")).await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(
        response.header("location"),
        "https://example.com/?q=rust&lang=en"
    );
    assert_eq!(common::clicks_of(&db.pool, key).await, 1);
}
