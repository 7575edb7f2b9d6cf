use axum::{
    http::{StatusCode, Uri},
    response::Json,
};
use serde_json::{json, Value};

use api_errors::{ErrDef, ProblemResponse};

pub const SERVICE_NAME: &str = "Account REST API Service";
pub const SERVICE_VERSION: &str = "1.0";

pub const ROUTE_NOT_FOUND: ErrDef = ErrDef {
    status: 404,
    title: "Not Found",
    code: "ROUTE_NOT_FOUND",
    type_url: "https://errors.example.com/ROUTE_NOT_FOUND",
};

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

pub async fn index() -> Json<Value> {
    tracing::info!("Request for Root URL");
    Json(json!({ "name": SERVICE_NAME, "version": SERVICE_VERSION }))
}

/// Plain OPTIONS on `/`; CORS preflights never get here.
pub async fn index_options() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found(uri: Uri) -> ProblemResponse {
    tracing::debug!(path = %uri.path(), "No route matched");
    ROUTE_NOT_FOUND.respond(
        format!("The requested URL {} was not found on the server.", uri.path()),
        uri.path(),
    )
}
