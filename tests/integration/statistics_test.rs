//! Integration tests for the staff-only statistics page and its JSON twin

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body, read_body_json};
use bookstore::entities::comments;
use bookstore::middlewares::flash::{self, Message};
use bookstore::responses::Statistics;
use bookstore::testing::setup;

use super::{location, messages};

#[actix_web::test]
async fn test_anonymous_is_sent_to_login() {
    let (service, _) = bookstore::service!();

    for uri in ["/statistics", "/api/statistics"] {
        let req = TestRequest::get().uri(uri).to_request();
        let res = call_service(&service, req).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&res), "/");
    }
}

#[actix_web::test]
async fn test_login_redirect_keeps_pending_messages() {
    let (service, _) = bookstore::service!();
    let pending = [Message::error("Wrong username or password.")];

    let req = TestRequest::get()
        .uri("/statistics")
        .cookie(flash::cookie(&pending))
        .to_request();
    let res = call_service(&service, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        messages(&res),
        vec![
            Message::error("Wrong username or password."),
            Message::error("Log in to see this page."),
        ]
    );
}

#[actix_web::test]
async fn test_regular_user_is_forbidden() {
    let (service, state) = bookstore::service!();
    let user = setup::create_test_user(&state.db, &state.hasher, false).await;
    let session = bookstore::login!(service, user.username, setup::PASSWORD).unwrap();

    for uri in ["/statistics", "/api/statistics"] {
        let req = TestRequest::get().uri(uri).cookie(session.clone()).to_request();
        let res = call_service(&service, req).await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{uri}");

        let body = read_body(res).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("You do not have permission to access this page."));
        assert!(!body.contains("<dt>Users</dt>"));
    }
}

#[actix_web::test]
async fn test_staff_sees_counts() {
    let (service, state) = bookstore::service!();
    let staff = setup::create_test_user(&state.db, &state.hasher, true).await;
    let reader = setup::create_test_user(&state.db, &state.hasher, false).await;

    let session = bookstore::login!(service, staff.username, setup::PASSWORD).unwrap();

    let req = TestRequest::post()
        .uri("/comment")
        .cookie(session.clone())
        .set_form(bookstore::requests::CommentRequest {
            slug: "the-time-machine".to_string(),
            comment: "Morlocks!".to_string(),
        })
        .to_request();
    call_service(&service, req).await;

    let req = TestRequest::get()
        .uri("/statistics")
        .cookie(session.clone())
        .to_request();
    let res = call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = read_body(res).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("<dt>Users</dt><dd>2</dd>"));
    assert!(body.contains("<dt>Books</dt><dd>5</dd>"));
    assert!(body.contains("<dt>Comments</dt><dd>1</dd>"));
    assert!(body.contains("href=\"/statistics\""));

    let req = TestRequest::get()
        .uri("/api/statistics")
        .cookie(session)
        .to_request();
    let res = call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let statistics: Statistics = read_body_json(res).await;
    assert_eq!(
        statistics,
        Statistics {
            users: 2,
            books: 5,
            comments: comments::Model::count(&state.db).await.unwrap(),
        }
    );
    assert_eq!(statistics.comments, 1);
    assert_ne!(reader.id, staff.id);
}
