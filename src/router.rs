use utoipa_swagger_ui::{SwaggerUi, Url};

use crate::config::AuthConfig;
use crate::{api, controllers};
use crate::prelude::*;

pub fn route(app: &mut ServiceConfig) {
    // Books
    app.service(controllers::books::index);
    app.service(controllers::books::show);
    app.service(controllers::books::comment);
    // Auth
    app.service(controllers::auth::register_form);
    app.service(controllers::auth::register);
    app.service(controllers::auth::login);
    app.service(controllers::auth::logout);
    // Statistics
    app.service(controllers::statistics::page);
    app.service(controllers::statistics::json);

    // Health check endpoints
    app.service(controllers::health::health);
    app.service(controllers::health::health_db);

    // Metrics endpoint
    app.service(controllers::metrics::metrics);
}

/// Swagger UI for the JSON endpoints. Must be registered after [`route`].
pub fn docs(app: &mut ServiceConfig, auth: &AuthConfig) {
    app.service(web::redirect("/docs", "/docs/"));
    app.service(SwaggerUi::new("/docs/{_:.*}").urls(vec![(
        Url::new("Bookstore", "/api.json"),
        api::document(auth),
    )]));
}
