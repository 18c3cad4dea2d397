use std::fmt::Write;

use crate::middlewares::auth::SessionUser;
use crate::middlewares::flash::Message;
use crate::responses::Statistics;

use super::layout;

pub fn render(user: &SessionUser, messages: &[Message], statistics: &Statistics) -> String {
    let mut body = String::from("<h1>Statistics</h1>\n<dl>\n");

    let _ = write!(
        body,
        "<dt>Users</dt><dd>{}</dd>\n<dt>Books</dt><dd>{}</dd>\n<dt>Comments</dt><dd>{}</dd>\n</dl>\n",
        statistics.users, statistics.books, statistics.comments
    );

    layout("Statistics", Some(user), messages, &body)
}
