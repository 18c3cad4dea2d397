use crate::entities::books;
use crate::middlewares::auth::CurrentUser;
use crate::middlewares::flash::FlashMessages;
use crate::prelude::*;
use crate::responses::Page;
use crate::templates;

#[::tracing::instrument(skip_all)]
pub async fn index(
    db: &DatabaseConnection,
    current: CurrentUser,
    flash: FlashMessages,
) -> Result<Page, Error> {
    let books = books::Model::all(db).await?;

    Ok(Page::new(templates::index::render(
        current.user(),
        flash.as_slice(),
        &books,
    )))
}
