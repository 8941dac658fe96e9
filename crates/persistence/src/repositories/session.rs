//! Session repository for database operations.

use domain::models::Session;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::session::SessionEntity;

/// Repository for session database operations.
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a session by its uuid.
    pub async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Session>, sqlx::Error> {
        let entity = sqlx::query_as::<_, SessionEntity>(
            r#"
            SELECT uuid, user_id, current_bingo_id, signed_out_at, created_at, last_seen_at
            FROM sessions
            WHERE uuid = $1
            "#,
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Set (or clear, with None) the session's current-bingo pointer.
    pub async fn set_current_bingo(
        &self,
        uuid: Uuid,
        bingo_id: Option<Uuid>,
    ) -> Result<Option<Session>, sqlx::Error> {
        let entity = sqlx::query_as::<_, SessionEntity>(
            r#"
            UPDATE sessions
            SET current_bingo_id = $2, last_seen_at = NOW()
            WHERE uuid = $1 AND signed_out_at IS NULL
            RETURNING uuid, user_id, current_bingo_id, signed_out_at, created_at, last_seen_at
            "#,
        )
        .bind(uuid)
        .bind(bingo_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }
}
