use chrono::Duration;
use sea_orm::prelude::*;

use crate::entities::sessions::{ActiveModel, Column, Entity, Model};
use crate::entities::users;
use crate::prelude::now;

impl Model {
    /// Opens a session for `user` lasting `lifetime`.
    pub async fn create(
        db: &DatabaseConnection,
        user: &users::Model,
        lifetime: Duration,
    ) -> Result<Self, DbErr> {
        let created_at = now();
        let expired_at = created_at
            .checked_add_signed(lifetime)
            .ok_or_else(|| DbErr::Custom("Session lifetime out of range".to_string()))?;
        let model = Self {
            id: Uuid::new_v4(),
            user_id: user.id,
            expired_at,
            created_at,
        };

        model.store(db).await
    }

    pub async fn store(&self, db: &DatabaseConnection) -> Result<Self, DbErr> {
        ActiveModel::from(self.clone()).insert(db).await
    }

    /// The session and its owner, unless the session is unknown or expired.
    pub async fn find_active(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<(Self, users::Model)>, DbErr> {
        let row = Entity::find_by_id(id)
            .filter(Column::ExpiredAt.gt(now()))
            .find_also_related(users::Entity)
            .one(db)
            .await
            .inspect_err(|e| {
                ::tracing::error!(error = %e, "Failed to find session");
            })?;

        Ok(row.and_then(|(session, user)| user.map(|user| (session, user))))
    }

    pub async fn destroy(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;

        Ok(())
    }

    /// Deletes every expired session and returns how many were removed.
    pub async fn purge_expired(db: &DatabaseConnection) -> Result<u64, DbErr> {
        let result = Entity::delete_many()
            .filter(Column::ExpiredAt.lte(now()))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }
}
