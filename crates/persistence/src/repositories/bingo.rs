//! Bingo repository for database operations.
//!
//! The bingo aggregate is managed elsewhere; this core only reads the
//! status and registration window it gates on.

use domain::models::Bingo;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::bingo::BingoEntity;

/// Repository for bingo database operations.
#[derive(Clone)]
pub struct BingoRepository {
    pool: PgPool,
}

impl BingoRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a bingo by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Bingo>, sqlx::Error> {
        let entity = sqlx::query_as::<_, BingoEntity>(
            r#"
            SELECT id, title, status, private, max_registration_date, created_at, updated_at
            FROM bingos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }
}
