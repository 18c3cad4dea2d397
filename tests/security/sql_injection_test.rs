//! SQL injection prevention tests
//!
//! Every query is built by the ORM with bound parameters. These tests push
//! classic payloads through each input and check they are treated as data.

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body};
use bookstore::entities::{books, comments, users};
use bookstore::testing::setup;
use sea_orm::{EntityTrait, PaginatorTrait};

const PAYLOADS: [&str; 5] = [
    "' OR '1'='1",
    "' OR 1=1 --",
    "admin'--",
    "'; DROP TABLE users; --",
    "\" OR \"\"=\"",
];

#[actix_web::test]
async fn test_login_injection_does_not_authenticate() {
    let (service, state) = bookstore::service!();
    setup::create_test_user(&state.db, &state.hasher, true).await;

    // Stay within the login burst of a single address
    for (i, payload) in PAYLOADS.iter().enumerate() {
        let req = TestRequest::post()
            .uri("/login")
            .insert_header(("X-Forwarded-For", format!("192.0.2.{}", i + 1)))
            .set_form(bookstore::requests::LoginRequest {
                username: payload.to_string(),
                password: payload.to_string(),
            })
            .to_request();
        let res = call_service(&service, req).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{payload}");
        assert!(
            res.response()
                .cookies()
                .all(|cookie| cookie.name() != "sessionid"),
            "{payload} must not log in"
        );
    }

    assert_eq!(users::Entity::find().count(&state.db).await.unwrap(), 1);
}

#[actix_web::test]
async fn test_slug_injection_is_not_found() {
    let (service, state) = bookstore::service!();

    for path in [
        "/books/frankenstein'%20OR%20'1'='1",
        "/books/'%20OR%201=1%20--",
        "/books/x';%20DROP%20TABLE%20books;%20--",
    ] {
        let req = TestRequest::get().uri(path).to_request();
        let res = call_service(&service, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path}");
    }

    assert_eq!(books::Entity::find().count(&state.db).await.unwrap(), 5);
}

#[actix_web::test]
async fn test_comment_payload_is_stored_verbatim() {
    let (service, state) = bookstore::service!();
    let user = setup::create_test_user(&state.db, &state.hasher, false).await;
    let session = bookstore::login!(service, user.username, setup::PASSWORD).unwrap();

    let payload = "'); DELETE FROM comments; DROP TABLE users; --";

    for slug in ["moby-dick", "moby-dick' OR '1'='1"] {
        let req = TestRequest::post()
            .uri("/comment")
            .cookie(session.clone())
            .set_form(bookstore::requests::CommentRequest {
                slug: slug.to_string(),
                comment: payload.to_string(),
            })
            .to_request();
        call_service(&service, req).await;
    }

    let stored = comments::Entity::find().all(&state.db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].comment, payload);
    assert_eq!(users::Entity::find().count(&state.db).await.unwrap(), 1);

    let req = TestRequest::get().uri("/books/moby-dick").to_request();
    let body = read_body(call_service(&service, req).await).await;
    assert!(std::str::from_utf8(&body)
        .unwrap()
        .contains("&#x27;); DELETE FROM comments; DROP TABLE users; --"));
}

#[actix_web::test]
async fn test_register_injection_is_rejected_by_validation() {
    let (service, state) = bookstore::service!();

    let req = TestRequest::post()
        .uri("/register")
        .set_form(bookstore::requests::RegisterRequest {
            username: "x'); DROP TABLE users; --".to_string(),
            password1: "Tea-and-Books-42".to_string(),
            password2: "Tea-and-Books-42".to_string(),
        })
        .to_request();
    let res = call_service(&service, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(users::Entity::find().count(&state.db).await.unwrap(), 0);
}
