//! Integration tests for the account lifecycle
//!
//! Registration, login, logout and login throttling are driven through the
//! same form posts a browser sends.

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body};
use bookstore::entities::users;
use bookstore::middlewares::flash::Message;
use bookstore::requests::RegisterRequest;
use bookstore::testing::setup;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::{location, messages};

fn register_form(username: &str, password1: &str, password2: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        password1: password1.to_string(),
        password2: password2.to_string(),
    }
}

// =============================================================================
// SUCCESS PATH
// =============================================================================

/// Register, land logged in, log out, log back in.
#[actix_web::test]
async fn test_register_logout_login() {
    let (service, state) = bookstore::service!();

    let req = TestRequest::post()
        .uri("/register")
        .set_form(register_form("margaret", "Tea-and-Books-42", "Tea-and-Books-42"))
        .to_request();
    let res = call_service(&service, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    let session = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "sessionid")
        .map(|cookie| cookie.into_owned())
        .expect("registration should log the user in");

    assert!(session.http_only().unwrap_or(false));

    // Stored as an Argon2id hash, never the plain password
    let stored = users::Entity::find()
        .filter(users::Column::Username.eq("margaret"))
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password.starts_with("$argon2id$"));
    assert!(!stored.is_staff);

    let req = TestRequest::get().uri("/").cookie(session.clone()).to_request();
    let body = read_body(call_service(&service, req).await).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("Logged in as margaret"));

    let req = TestRequest::post()
        .uri("/logout")
        .cookie(session.clone())
        .to_request();
    let res = call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    // The old cookie no longer authenticates anybody
    let req = TestRequest::get().uri("/").cookie(session).to_request();
    let body = read_body(call_service(&service, req).await).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(!body.contains("Logged in as"));
    assert!(body.contains("action=\"/login\""));

    let again = bookstore::login!(service, "margaret", "Tea-and-Books-42");
    assert!(again.is_some(), "Login with the registered password should succeed");
}

#[actix_web::test]
async fn test_logout_via_get() {
    let (service, state) = bookstore::service!();
    let user = setup::create_test_user(&state.db, &state.hasher, false).await;

    let session = bookstore::login!(service, user.username, setup::PASSWORD).unwrap();

    let req = TestRequest::get().uri("/logout").cookie(session).to_request();
    let res = call_service(&service, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let cleared = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "sessionid")
        .unwrap();
    assert_eq!(cleared.value(), "");
}

#[actix_web::test]
async fn test_logged_in_user_skips_registration() {
    let (service, state) = bookstore::service!();
    let user = setup::create_test_user(&state.db, &state.hasher, false).await;
    let session = bookstore::login!(service, user.username, setup::PASSWORD).unwrap();

    let req = TestRequest::get()
        .uri("/register")
        .cookie(session.clone())
        .to_request();
    let res = call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    let req = TestRequest::post()
        .uri("/register")
        .cookie(session)
        .set_form(register_form("another", "Tea-and-Books-42", "Tea-and-Books-42"))
        .to_request();
    let res = call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let created = users::Entity::find()
        .filter(users::Column::Username.eq("another"))
        .one(&state.db)
        .await
        .unwrap();
    assert!(created.is_none());
}

// =============================================================================
// FAILURE PATH
// =============================================================================

#[actix_web::test]
async fn test_wrong_password_flashes_generic_error() {
    let (service, state) = bookstore::service!();
    let user = setup::create_test_user(&state.db, &state.hasher, false).await;

    for (username, password) in [
        (user.username.as_str(), "not-the-password"),
        ("nobody-by-that-name", setup::PASSWORD),
    ] {
        let req = TestRequest::post()
            .uri("/login")
            .set_form(bookstore::requests::LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .to_request();
        let res = call_service(&service, req).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/");
        assert_eq!(
            messages(&res),
            vec![Message::error("Wrong username or password.")]
        );
        assert!(res
            .response()
            .cookies()
            .all(|cookie| cookie.name() != "sessionid"));
    }
}

#[actix_web::test]
async fn test_register_rejections() {
    let (service, state) = bookstore::service!();
    let existing = setup::create_test_user(&state.db, &state.hasher, false).await;

    let cases = [
        (
            register_form("newcomer", "Tea-and-Books-42", "Tea-and-Books-43"),
            "Passwords do not match.",
        ),
        (
            register_form(&existing.username, "Tea-and-Books-42", "Tea-and-Books-42"),
            "Username already registered.",
        ),
        (
            register_form("newcomer", "short", "short"),
            "This password is too short. It must contain at least 8 characters.",
        ),
        (
            register_form("newcomer", "password123", "password123"),
            "This password is too common.",
        ),
        (
            register_form("newcomer", "8675309123", "8675309123"),
            "This password is entirely numeric.",
        ),
        (
            register_form("new comer", "Tea-and-Books-42", "Tea-and-Books-42"),
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        ),
    ];

    for (form, expected) in cases {
        let req = TestRequest::post().uri("/register").set_form(&form).to_request();
        let res = call_service(&service, req).await;

        assert_eq!(res.status(), StatusCode::OK, "{expected}");

        let body = read_body(res).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains(expected), "missing {expected:?} in {body}");
    }

    let users = users::Entity::find().all(&state.db).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[actix_web::test]
async fn test_login_throttled_after_burst() {
    let (service, state) = bookstore::service!();
    let user = setup::create_test_user(&state.db, &state.hasher, false).await;

    for _ in 0..5 {
        let req = TestRequest::post()
            .uri("/login")
            .insert_header(("X-Forwarded-For", "203.0.113.7"))
            .set_form(bookstore::requests::LoginRequest {
                username: user.username.clone(),
                password: "guess".to_string(),
            })
            .to_request();
        let res = call_service(&service, req).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    // Even the right password is refused while throttled
    let req = TestRequest::post()
        .uri("/login")
        .insert_header(("X-Forwarded-For", "203.0.113.7"))
        .set_form(bookstore::requests::LoginRequest {
            username: user.username.clone(),
            password: setup::PASSWORD.to_string(),
        })
        .to_request();
    let res = call_service(&service, req).await;

    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(res.headers().contains_key("retry-after"));
    assert!(res
        .response()
        .cookies()
        .all(|cookie| cookie.name() != "sessionid"));

    // Other addresses are unaffected
    let req = TestRequest::post()
        .uri("/login")
        .insert_header(("X-Forwarded-For", "198.51.100.1"))
        .set_form(bookstore::requests::LoginRequest {
            username: user.username.clone(),
            password: setup::PASSWORD.to_string(),
        })
        .to_request();
    let res = call_service(&service, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert!(res
        .response()
        .cookies()
        .any(|cookie| cookie.name() == "sessionid"));
}

/// A session key planted before login must not become authenticated.
#[actix_web::test]
async fn test_login_rotates_session() {
    let (service, state) = bookstore::service!();
    let user = setup::create_test_user(&state.db, &state.hasher, false).await;

    let first = bookstore::login!(service, user.username, setup::PASSWORD).unwrap();

    let req = TestRequest::post()
        .uri("/login")
        .cookie(first.clone())
        .set_form(bookstore::requests::LoginRequest {
            username: user.username.clone(),
            password: setup::PASSWORD.to_string(),
        })
        .to_request();
    let res = call_service(&service, req).await;
    let second = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "sessionid")
        .map(|cookie| cookie.into_owned())
        .unwrap();

    assert_ne!(first.value(), second.value());

    let req = TestRequest::get().uri("/").cookie(first).to_request();
    let body = read_body(call_service(&service, req).await).await;
    assert!(!std::str::from_utf8(&body).unwrap().contains("Logged in as"));

    let req = TestRequest::get().uri("/").cookie(second).to_request();
    let body = read_body(call_service(&service, req).await).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("Logged in as"));
}
