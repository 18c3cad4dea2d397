//! Integration tests for health and metrics endpoints

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body, read_body_json};

#[actix_web::test]
async fn test_health() {
    let (service, _) = bookstore::service!();

    let req = TestRequest::get().uri("/health").to_request();
    let res = call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = read_body_json(res).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_health_db() {
    let (service, _) = bookstore::service!();

    let req = TestRequest::get().uri("/health/db").to_request();
    let res = call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = read_body_json(res).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_metrics_after_login_attempt() {
    let (service, _) = bookstore::service!();

    bookstore::login!(service, "nobody", "nothing");

    let req = TestRequest::get().uri("/metrics").to_request();
    let res = call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = read_body(res).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("login_attempts_total"));
}
