#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;

use accounts::{config::AccountsConfig, domain::service::Service, Accounts};

/// Fresh in-memory database with the schema applied.
///
/// One pooled connection, otherwise every connection would open its own
/// empty `:memory:` database.
pub async fn create_test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to test database");

    Accounts::migrate(&db)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn create_test_module() -> Accounts {
    Accounts::init(create_test_db().await, &AccountsConfig::default())
}

pub async fn create_test_service() -> Arc<Service> {
    create_test_module().await.service()
}

/// Full HTTP stack: accounts routes behind the ingress middleware.
pub async fn create_test_router() -> Router {
    let module = create_test_module().await;
    let ingress = api_ingress::ApiIngress::default();
    ingress
        .build_router(module.register_rest(Router::new()), Some(module.openapi()))
        .expect("router")
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "localhost")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "localhost")
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(resp: Response<Body>) -> axum::body::Bytes {
    axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
}
