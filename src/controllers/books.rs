use crate::metrics::AppMetrics;
use crate::middlewares::auth::{Auth, CurrentUser};
use crate::middlewares::flash::FlashMessages;
use crate::prelude::*;
use crate::requests::CommentRequest;
use crate::services;

/// Catalogue
#[get("/")]
pub async fn index(
    db: Data<DatabaseConnection>,
    current: CurrentUser,
    flash: FlashMessages,
) -> Result<impl Responder, Error> {
    services::books::index(&db, current, flash).await
}

/// Book page with its comments
#[get("/books/{slug}")]
pub async fn show(
    db: Data<DatabaseConnection>,
    current: CurrentUser,
    flash: FlashMessages,
    slug: Path<String>,
) -> Result<impl Responder, Error> {
    services::books::show(&db, current, flash, &slug).await
}

/// Post a comment. Login required.
#[post("/comment")]
pub async fn comment(
    db: Data<DatabaseConnection>,
    metrics: Data<AppMetrics>,
    auth: Auth,
    flash: FlashMessages,
    Form(request): Form<CommentRequest>,
) -> Result<impl Responder, Error> {
    services::books::comment(&db, &metrics, auth, flash, request).await
}
