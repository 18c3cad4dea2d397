use crate::entities::books;
use crate::middlewares::auth::CurrentUser;
use crate::middlewares::flash::FlashMessages;
use crate::prelude::*;
use crate::responses::Page;
use crate::templates;

pub const NOT_FOUND: &str = "No book matches the given query.";

#[::tracing::instrument(skip(db, current, flash))]
pub async fn show(
    db: &DatabaseConnection,
    current: CurrentUser,
    flash: FlashMessages,
    slug: &str,
) -> Result<Page, Error> {
    let Some(book) = books::Model::find_by_slug(db, slug).await? else {
        return Err(Error::not_found(NOT_FOUND));
    };
    let comments = book.comments(db).await?;

    Ok(Page::new(templates::book::render(
        current.user(),
        flash.as_slice(),
        &book,
        &comments,
    )))
}
