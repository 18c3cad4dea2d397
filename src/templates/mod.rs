//! Server-side HTML rendering.
//!
//! Pages are assembled from string fragments. Anything that did not come from
//! this module passes through [`escape`] before it is interpolated.

pub mod book;
pub mod error;
pub mod index;
pub mod register;
pub mod statistics;

use std::fmt::Write;

use crate::middlewares::auth::SessionUser;
use crate::middlewares::flash::Message;

/// Escape text for use in element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }

    escaped
}

/// Wraps `body` in the shared page chrome.
///
/// The navigation shows the login form to visitors and the username with a
/// logout button to logged-in users; staff also get a statistics link.
pub fn layout(
    title: &str,
    user: Option<&SessionUser>,
    messages: &[Message],
    body: &str,
) -> String {
    let mut html = String::with_capacity(body.len() + 1024);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} | Bookstore</title>\n\
         </head>\n<body>\n<header>\n<nav>\n<a href=\"/\">Bookstore</a>\n",
        escape(title)
    );

    match user {
        Some(user) => {
            if user.is_staff {
                html.push_str("<a href=\"/statistics\">Statistics</a>\n");
            }

            let _ = write!(
                html,
                "<span class=\"user\">Logged in as {}</span>\n\
                 <form method=\"post\" action=\"/logout\">\
                 <button type=\"submit\">Log out</button></form>\n",
                escape(&user.username)
            );
        }
        None => {
            html.push_str(
                "<form method=\"post\" action=\"/login\" class=\"login\">\n\
                 <label>Username <input type=\"text\" name=\"username\" maxlength=\"150\" required></label>\n\
                 <label>Password <input type=\"password\" name=\"password\" required></label>\n\
                 <button type=\"submit\">Log in</button>\n\
                 </form>\n\
                 <a href=\"/register\">Register</a>\n",
            );
        }
    }

    html.push_str("</nav>\n</header>\n");

    if !messages.is_empty() {
        html.push_str("<ul class=\"messages\">\n");

        for message in messages {
            let _ = writeln!(
                html,
                "<li class=\"{}\">{}</li>",
                message.level.as_str(),
                escape(&message.text)
            );
        }

        html.push_str("</ul>\n");
    }

    let _ = write!(html, "<main>\n{body}\n</main>\n</body>\n</html>\n");

    html
}
