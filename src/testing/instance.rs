//! Test service builders.
//!
//! `service!()` wires a fresh [`AppState`](crate::state::AppState) and the
//! full router into an initialised test service and yields `(service, state)`.
//! `login!(service, username, password)` posts the login form and yields the
//! session cookie, if one was issued.

#[macro_export]
macro_rules! service {
    () => {{
        let state = $crate::testing::setup::state().await;
        let app = ::actix_web::App::new()
            .wrap($crate::security::SecurityHeadersMiddleware::default())
            .configure(|app| state.configure(app))
            .configure($crate::router::route);

        let service = ::actix_web::test::init_service(app).await;

        (service, state)
    }};
}

#[macro_export]
macro_rules! login {
    ($service:expr, $username:expr, $password:expr) => {{
        let form = $crate::requests::LoginRequest {
            username: ::std::string::ToString::to_string(&$username),
            password: ::std::string::ToString::to_string(&$password),
        };
        let req = ::actix_web::test::TestRequest::post()
            .uri("/login")
            .set_form(&form)
            .to_request();
        let res = ::actix_web::test::call_service(&$service, req).await;

        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "sessionid" && !cookie.value().is_empty())
            .map(|cookie| cookie.into_owned())
    }};
}
