use crate::metrics::AppMetrics;
use crate::middlewares::auth::Staff;
use crate::middlewares::flash::FlashMessages;
use crate::prelude::*;
use crate::responses::{Page, Statistics};
use crate::services;
use crate::templates;

/// Site statistics page. Staff only.
#[get("/statistics")]
pub async fn page(
    db: Data<DatabaseConnection>,
    metrics: Data<AppMetrics>,
    staff: Staff,
    flash: FlashMessages,
) -> Result<impl Responder, Error> {
    let statistics = services::statistics::statistics(&db, &metrics).await?;

    Ok(Page::new(templates::statistics::render(
        &staff,
        flash.as_slice(),
        &statistics,
    )))
}

/// Site statistics
///
/// Fail if:
/// - not logged in (redirect to the catalogue)
/// - logged in user is not staff
#[utoipa::path(
    get,
    path = "/api/statistics",
    tag = "Statistics",
    security(("session" = [])),
    responses(
        Statistics,
        (status = 303, description = "Not logged in"),
        (status = 403, description = "Not a staff member"),
    )
)]
#[get("/api/statistics")]
pub async fn json(
    db: Data<DatabaseConnection>,
    metrics: Data<AppMetrics>,
    _staff: Staff,
) -> Result<impl Responder, Error> {
    let statistics = services::statistics::statistics(&db, &metrics).await?;

    Ok(Json(statistics))
}
