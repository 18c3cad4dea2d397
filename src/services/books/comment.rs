use crate::entities::{books, comments, users};
use crate::metrics::AppMetrics;
use crate::middlewares::auth::Auth;
use crate::middlewares::flash::FlashMessages;
use crate::prelude::*;
use crate::requests::CommentRequest;
use crate::responses::Redirect;

use super::show::NOT_FOUND;

/// Stores a comment on the book named by `slug`, attributed to the
/// logged-in user, and returns to the book page.
///
/// The text is kept verbatim apart from surrounding whitespace.
#[::tracing::instrument(skip_all, fields(user_id = %auth.user_id, slug = %request.slug))]
pub async fn comment(
    db: &DatabaseConnection,
    metrics: &AppMetrics,
    auth: Auth,
    flash: FlashMessages,
    request: CommentRequest,
) -> Result<Redirect, Error> {
    let Some(book) = books::Model::find_by_slug(db, &request.slug).await? else {
        return Err(Error::not_found(NOT_FOUND));
    };
    let location = format!("/books/{}", urlencoding::encode(&book.slug));

    let text = match request.validate() {
        Ok(text) => text,
        Err(message) => return Ok(Redirect::to(location).error(message)),
    };

    let Some(user) = users::Model::find_by_id(db, auth.user_id).await? else {
        // The account was deleted while its session was still cached.
        return Err(Error::login_required(flash));
    };

    comments::Model::create(db, &book, Some(&user), text).await?;
    metrics.record_comment();

    ::tracing::info!(book_id = %book.id, "Comment posted");

    Ok(Redirect::to(location))
}
