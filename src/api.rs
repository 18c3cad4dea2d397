use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::config::AuthConfig;
use crate::{controllers, responses};

/// Registers the configured session cookie as the `session` security scheme.
pub struct SessionCookie {
    pub name: String,
}

impl Modify for SessionCookie {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "session",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(self.name.clone()))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Bookstore"),
    tags(
        (name = "Health"),
        (name = "Statistics"),
    ),
    paths(
        controllers::health::health,
        controllers::health::health_db,

        controllers::statistics::json,
    ),
    components(schemas(
        responses::Statistics,

        controllers::health::LivenessResponse,
        controllers::health::HealthResponse,
    )),
)]
pub struct Definition;

/// The served document, with the session scheme named after `auth.session_cookie`.
pub fn document(auth: &AuthConfig) -> utoipa::openapi::OpenApi {
    let mut doc = Definition::openapi();

    SessionCookie {
        name: auth.session_cookie.clone(),
    }
    .modify(&mut doc);

    doc
}
