//! Activity log repository for database operations.

use domain::models::ActivityEvent;
use sqlx::PgPool;

/// Repository for activity log inserts.
#[derive(Clone)]
pub struct ActivityLogRepository {
    pool: PgPool,
}

impl ActivityLogRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one activity fact.
    pub async fn insert(&self, event: &ActivityEvent) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs (bingo_id, actor_id, target_user_id, kind, detail)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.bingo_id)
        .bind(event.actor_id)
        .bind(event.target_user_id)
        .bind(event.kind.to_string())
        .bind(&event.detail)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
