use actix_web::http::StatusCode;

use super::{escape, layout};

/// Standalone error page. It never shows the login state, so it can be
/// rendered without touching the session store.
pub fn render(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{} {}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to the catalogue</a></p>\n",
        status.as_u16(),
        escape(title),
        escape(message)
    );

    layout(title, None, &[], &body)
}
