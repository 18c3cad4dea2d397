use crate::middlewares::auth::Sessions;
use crate::prelude::*;
use crate::responses::Redirect;

/// Ends the session carried by the request, if any.
#[::tracing::instrument(skip_all)]
pub async fn logout(
    req: &HttpRequest,
    db: &DatabaseConnection,
    sessions: &Sessions,
) -> Result<Redirect, Error> {
    if let Some(id) = sessions.session_id(req) {
        sessions.destroy(db, id).await?;
    }

    Ok(Redirect::to("/").cookie(sessions.removal_cookie()))
}
