//! Integration tests for the security headers middleware
//!
//! Every response, pages and errors alike, carries the hardening headers.

use actix_web::test::{self, TestRequest, call_service};
use actix_web::{App, HttpResponse, web};
use bookstore::config::SecurityHeadersConfig;
use bookstore::security::SecurityHeadersMiddleware;

#[actix_web::test]
async fn test_headers_on_pages_and_errors() {
    let (service, _) = bookstore::service!();

    for uri in ["/", "/books/frankenstein", "/books/missing", "/register"] {
        let req = TestRequest::get().uri(uri).to_request();
        let res = call_service(&service, req).await;
        let headers = res.headers();

        assert_eq!(
            headers.get("content-security-policy").unwrap(),
            "default-src 'self'; form-action 'self'; frame-ancestors 'none'",
            "{uri}"
        );
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY", "{uri}");
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff", "{uri}");
        assert_eq!(headers.get("referrer-policy").unwrap(), "same-origin", "{uri}");
        assert!(headers.contains_key("strict-transport-security"), "{uri}");
    }
}

#[actix_web::test]
async fn test_pages_have_no_inline_script_or_style() {
    let (service, _) = bookstore::service!();

    let req = TestRequest::get().uri("/books/frankenstein").to_request();
    let body = test::read_body(call_service(&service, req).await).await;
    let body = std::str::from_utf8(&body).unwrap();

    assert!(!body.contains("<script"));
    assert!(!body.contains("<style"));
    assert!(!body.contains(" style="));
    assert!(!body.contains(" onclick="));
}

#[actix_web::test]
async fn test_disabled_middleware_adds_nothing() {
    let config = SecurityHeadersConfig {
        enabled: false,
        ..SecurityHeadersConfig::default()
    };
    let app = test::init_service(
        App::new()
            .wrap(SecurityHeadersMiddleware::new(config))
            .route("/test", web::get().to(|| async { HttpResponse::Ok().body("OK") })),
    )
    .await;

    let req = TestRequest::get().uri("/test").to_request();
    let res = call_service(&app, req).await;

    assert!(!res.headers().contains_key("content-security-policy"));
    assert!(!res.headers().contains_key("x-frame-options"));
}

#[actix_web::test]
async fn test_custom_policy_is_applied() {
    let config = SecurityHeadersConfig {
        csp: "default-src 'none'".to_string(),
        hsts_max_age: 0,
        ..SecurityHeadersConfig::default()
    };
    let app = test::init_service(
        App::new()
            .wrap(SecurityHeadersMiddleware::new(config))
            .route("/test", web::get().to(|| async { HttpResponse::Ok().body("OK") })),
    )
    .await;

    let req = TestRequest::get().uri("/test").to_request();
    let res = call_service(&app, req).await;

    assert_eq!(
        res.headers().get("content-security-policy").unwrap(),
        "default-src 'none'"
    );
    assert!(!res.headers().contains_key("strict-transport-security"));
}
