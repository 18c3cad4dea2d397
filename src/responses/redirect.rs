use actix_web::http::header;

use crate::middlewares::flash::{self, FlashMessages, Message};
use crate::prelude::*;

/// A `303 See Other` that can queue flash messages and set cookies.
///
/// Messages already pending on the request are kept, so a chain of
/// redirects delivers everything to the page that finally renders.
pub struct Redirect {
    location: String,
    messages: Vec<Message>,
    cookies: Vec<Cookie<'static>>,
}

impl Redirect {
    pub fn to<T: Into<String>>(location: T) -> Self {
        Self {
            location: location.into(),
            messages: Vec::new(),
            cookies: Vec::new(),
        }
    }

    pub fn error<T: ToString>(mut self, text: T) -> Self {
        self.messages.push(Message::error(text));
        self
    }

    pub fn cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }
}

impl Responder for Redirect {
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        let mut builder = HttpResponse::SeeOther();

        builder.insert_header((header::LOCATION, self.location));

        if !self.messages.is_empty() {
            let mut pending = FlashMessages::read(req);

            for message in self.messages {
                pending.push(message);
            }

            builder.cookie(flash::cookie(pending.as_slice()));
        }

        for cookie in self.cookies {
            builder.cookie(cookie);
        }

        builder.finish()
    }
}
