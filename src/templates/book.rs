use std::fmt::Write;

use crate::entities::books;
use crate::middlewares::auth::SessionUser;
use crate::middlewares::flash::Message;
use crate::models::CommentWithAuthor;

use super::{escape, layout};

pub fn render(
    user: Option<&SessionUser>,
    messages: &[Message],
    book: &books::Model,
    comments: &[CommentWithAuthor],
) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        "<article class=\"book\">\n<h1>{}</h1>\n<p class=\"author\">by {}</p>\n<p>{}</p>\n</article>\n",
        escape(&book.title),
        escape(&book.author),
        escape(&book.description)
    );

    body.push_str("<section class=\"comments\">\n<h2>Comments</h2>\n");

    if comments.is_empty() {
        body.push_str("<p>No comments yet.</p>\n");
    } else {
        body.push_str("<ul>\n");

        for comment in comments {
            let author = comment.author.as_deref().unwrap_or("deleted user");

            let _ = writeln!(
                body,
                "<li><p>{}</p><small>{} on {}</small></li>",
                escape(&comment.comment),
                escape(author),
                comment.created_at.format("%Y-%m-%d %H:%M")
            );
        }

        body.push_str("</ul>\n");
    }

    if user.is_some() {
        let _ = write!(
            body,
            "<form method=\"post\" action=\"/comment\">\n\
             <input type=\"hidden\" name=\"slug\" value=\"{}\">\n\
             <label>Comment <textarea name=\"comment\" maxlength=\"1000\" required></textarea></label>\n\
             <button type=\"submit\">Post</button>\n\
             </form>\n",
            escape(&book.slug)
        );
    } else {
        body.push_str("<p>Log in to leave a comment.</p>\n");
    }

    body.push_str("</section>\n");

    layout(&book.title, user, messages, &body)
}
