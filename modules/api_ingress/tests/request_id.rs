use api_ingress::{request_id::XRequestId, ApiIngress};
use axum::{body::Body, extract::Extension, http::Request, routing::get, Router};
use tower::ServiceExt;

async fn echo_request_id(Extension(rid): Extension<XRequestId>) -> String {
    rid.0
}

fn router() -> Router {
    let routes = Router::new().route("/rid", get(echo_request_id));
    ApiIngress::default().build_router(routes, None).unwrap()
}

#[tokio::test]
async fn generates_request_id_when_missing() {
    let res = router()
        .oneshot(Request::get("/rid").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let header = res
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .unwrap()
        .to_owned();
    assert_eq!(header.len(), 21, "nanoid default length");

    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(String::from_utf8(body.to_vec()).unwrap(), header);
}

#[tokio::test]
async fn preserves_incoming_request_id() {
    let res = router()
        .oneshot(
            Request::get("/rid")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.headers()["x-request-id"], "abc-123");
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"abc-123");
}

#[tokio::test]
async fn error_responses_carry_request_id() {
    let res = router()
        .oneshot(Request::get("/missing").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert!(res.headers().contains_key("x-request-id"));
}
