use crate::entities::{books, comments, users};
use crate::metrics::AppMetrics;
use crate::prelude::*;
use crate::responses::Statistics;

#[::tracing::instrument(skip_all)]
pub async fn statistics(
    db: &DatabaseConnection,
    metrics: &AppMetrics,
) -> Result<Statistics, Error> {
    let statistics = Statistics {
        users: users::Model::count(db).await?,
        books: books::Model::count(db).await?,
        comments: comments::Model::count(db).await?,
    };

    metrics.set_users_total(statistics.users);

    Ok(statistics)
}
