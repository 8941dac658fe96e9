//! Team repository for database operations.

use domain::models::Team;
use shared::validation::normalize_name;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::team::TeamEntity;

/// Repository for team database operations.
#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a non-deleted team by display name within a bingo.
    ///
    /// The lookup runs against the normalized name, so "Red Team" and
    /// " red  TEAM " resolve to the same row.
    pub async fn find_by_name(
        &self,
        bingo_id: Uuid,
        name: &str,
    ) -> Result<Option<Team>, sqlx::Error> {
        let entity = sqlx::query_as::<_, TeamEntity>(
            r#"
            SELECT id, bingo_id, name, name_normalized, captain_id, points,
                   deleted_at, created_at, updated_at
            FROM teams
            WHERE bingo_id = $1 AND name_normalized = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(bingo_id)
        .bind(normalize_name(name))
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find a non-deleted team by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, sqlx::Error> {
        let entity = sqlx::query_as::<_, TeamEntity>(
            r#"
            SELECT id, bingo_id, name, name_normalized, captain_id, points,
                   deleted_at, created_at, updated_at
            FROM teams
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Create a team. The normalized name carries the per-bingo uniqueness
    /// constraint.
    pub async fn create(
        &self,
        bingo_id: Uuid,
        name: &str,
        captain_id: Option<Uuid>,
    ) -> Result<Team, sqlx::Error> {
        let entity = sqlx::query_as::<_, TeamEntity>(
            r#"
            INSERT INTO teams (bingo_id, name, name_normalized, captain_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, bingo_id, name, name_normalized, captain_id, points,
                      deleted_at, created_at, updated_at
            "#,
        )
        .bind(bingo_id)
        .bind(name.trim())
        .bind(normalize_name(name))
        .bind(captain_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Soft-delete a team. Returns false if already deleted or missing.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE teams
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use shared::validation::normalize_name;

    #[test]
    fn test_lookup_uses_normalized_form() {
        assert_eq!(normalize_name(" Red  Team "), "red team");
    }
}
