use std::fmt::Write;

use crate::middlewares::flash::Message;

use super::{escape, layout};

/// Registration form. `username` is echoed back after a failed attempt;
/// passwords never are. Validation failures arrive as error messages.
pub fn render(messages: &[Message], username: &str) -> String {
    let mut body = String::from("<h1>Register</h1>\n");

    let _ = write!(
        body,
        "<form method=\"post\" action=\"/register\">\n\
         <label>Username <input type=\"text\" name=\"username\" value=\"{}\" maxlength=\"150\" required></label>\n\
         <p class=\"help\">150 characters or fewer. Letters, digits and @/./+/-/_ only.</p>\n\
         <label>Password <input type=\"password\" name=\"password1\" required></label>\n\
         <p class=\"help\">At least 8 characters, not entirely numeric and not a common password.</p>\n\
         <label>Password confirmation <input type=\"password\" name=\"password2\" required></label>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n",
        escape(username)
    );

    layout("Register", None, messages, &body)
}
