//! XSS prevention tests
//!
//! Pages are rendered server side. Every piece of user-controlled text is
//! HTML-escaped before it reaches the markup, and the CSP forbids inline
//! script as a second line of defence.

use actix_web::cookie::Cookie;
use actix_web::test::{TestRequest, call_service, read_body};
use bookstore::middlewares::flash::{self, Message};
use bookstore::testing::setup;

const PAYLOADS: [&str; 4] = [
    "<script>alert('XSS')</script>",
    "<img src=x onerror=alert(1)>",
    "\"><svg onload=alert(1)>",
    "<a href=\"javascript:alert(1)\">click</a>",
];

fn assert_inert(body: &str) {
    assert!(!body.contains("<script>alert"), "raw script tag in page");
    assert!(!body.contains("<img src=x"), "raw img tag in page");
    assert!(!body.contains("<svg"), "raw svg tag in page");
    assert!(!body.contains("<a href=\"javascript:"), "raw javascript link in page");
}

#[actix_web::test]
async fn test_stored_xss_in_comments() {
    let (service, state) = bookstore::service!();
    let user = setup::create_test_user(&state.db, &state.hasher, false).await;
    let session = bookstore::login!(service, user.username, setup::PASSWORD).unwrap();

    for payload in PAYLOADS {
        let req = TestRequest::post()
            .uri("/comment")
            .cookie(session.clone())
            .set_form(bookstore::requests::CommentRequest {
                slug: "pride-and-prejudice".to_string(),
                comment: payload.to_string(),
            })
            .to_request();
        call_service(&service, req).await;
    }

    let req = TestRequest::get()
        .uri("/books/pride-and-prejudice")
        .to_request();
    let body = read_body(call_service(&service, req).await).await;
    let body = std::str::from_utf8(&body).unwrap();

    assert_inert(body);
    assert!(body.contains("&lt;script&gt;alert(&#x27;XSS&#x27;)&lt;/script&gt;"));
    assert!(body.contains("&quot;&gt;&lt;svg onload=alert(1)&gt;"));
}

#[actix_web::test]
async fn test_reflected_xss_in_registration_form() {
    let (service, _) = bookstore::service!();

    for payload in PAYLOADS {
        let req = TestRequest::post()
            .uri("/register")
            .set_form(bookstore::requests::RegisterRequest {
                username: payload.to_string(),
                password1: "Tea-and-Books-42".to_string(),
                password2: "Tea-and-Books-42".to_string(),
            })
            .to_request();
        let body = read_body(call_service(&service, req).await).await;
        let body = std::str::from_utf8(&body).unwrap();

        assert_inert(body);
        assert!(body.contains("Enter a valid username."));
    }
}

/// A hand-crafted flash cookie renders as text, never markup.
#[actix_web::test]
async fn test_flash_cookie_cannot_inject_markup() {
    let (service, _) = bookstore::service!();

    let messages = PAYLOADS.map(Message::error);
    let cookie = Cookie::new(flash::COOKIE, flash::encode(&messages));

    let req = TestRequest::get().uri("/").cookie(cookie).to_request();
    let body = read_body(call_service(&service, req).await).await;
    let body = std::str::from_utf8(&body).unwrap();

    assert_inert(body);
    assert!(body.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

#[actix_web::test]
async fn test_malformed_flash_cookie_is_ignored() {
    let (service, _) = bookstore::service!();

    let req = TestRequest::get()
        .uri("/")
        .cookie(Cookie::new(flash::COOKIE, "<script>alert(1)</script>"))
        .to_request();
    let res = call_service(&service, req).await;
    assert!(res.status().is_success());

    let body = read_body(res).await;
    let body = std::str::from_utf8(&body).unwrap();

    assert_inert(body);
    assert!(!body.contains("class=\"messages\""));
}

#[actix_web::test]
async fn test_xss_username_is_never_stored() {
    let (service, state) = bookstore::service!();

    let req = TestRequest::post()
        .uri("/register")
        .set_form(bookstore::requests::RegisterRequest {
            username: "<b>bold</b>".to_string(),
            password1: "Tea-and-Books-42".to_string(),
            password2: "Tea-and-Books-42".to_string(),
        })
        .to_request();
    call_service(&service, req).await;

    assert!(
        bookstore::entities::users::Model::find_by_username(&state.db, "<b>bold</b>")
            .await
            .unwrap()
            .is_none()
    );
}
