use std::fmt::Write;

use crate::entities::books;
use crate::middlewares::auth::SessionUser;
use crate::middlewares::flash::Message;

use super::{escape, layout};

pub fn render(user: Option<&SessionUser>, messages: &[Message], books: &[books::Model]) -> String {
    let mut body = String::from("<h1>Catalogue</h1>\n");

    if books.is_empty() {
        body.push_str("<p>No books yet.</p>\n");
    } else {
        body.push_str("<ul class=\"books\">\n");

        for book in books {
            let _ = writeln!(
                body,
                "<li><a href=\"/books/{}\">{}</a> by {}</li>",
                escape(&book.slug),
                escape(&book.title),
                escape(&book.author)
            );
        }

        body.push_str("</ul>\n");
    }

    layout("Catalogue", user, messages, &body)
}
