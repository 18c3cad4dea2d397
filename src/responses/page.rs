use actix_web::http::header::ContentType;

use crate::middlewares::flash;
use crate::prelude::*;

/// A rendered HTML document.
///
/// Rendering a page consumes the pending flash messages, so the responder
/// clears the messages cookie whenever the request carried one.
pub struct Page {
    html: String,
}

impl Page {
    pub fn new(html: String) -> Self {
        Self { html }
    }
}

impl Responder for Page {
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        let mut builder = HttpResponse::Ok();

        builder.insert_header(ContentType::html());

        if req.cookie(flash::COOKIE).is_some() {
            builder.cookie(flash::removal());
        }

        builder.body(self.html)
    }
}
