//! Participant repository for database operations.

use domain::models::{Participant, ParticipantRole};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::participant::{ParticipantEntity, ParticipantRoleDb};
use crate::metrics::QueryTimer;

/// Repository for participant database operations.
#[derive(Clone)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the active participant row for a (bingo, user) pair.
    ///
    /// Removed rows are invisible here; at most one active row exists per
    /// pair (partial unique index on (bingo_id, user_id) WHERE deleted_at
    /// IS NULL).
    pub async fn find_active(
        &self,
        bingo_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let timer = QueryTimer::new("participant_find_active");
        let entity = sqlx::query_as::<_, ParticipantEntity>(
            r#"
            SELECT id, bingo_id, user_id, role, team_id, points,
                   deleted_at, deleted_by, created_at, updated_at, created_by
            FROM participants
            WHERE bingo_id = $1 AND user_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(bingo_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();

        Ok(entity.map(Into::into))
    }

    /// Check if a user is an active participant of a bingo.
    pub async fn exists_active(&self, bingo_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM participants WHERE bingo_id = $1 AND user_id = $2 AND deleted_at IS NULL)",
        )
        .bind(bingo_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Create an active participant row.
    ///
    /// A rejoin after removal lands here too: always a fresh row with points
    /// zero. The partial unique index rejects a second active row per pair.
    pub async fn create(
        &self,
        bingo_id: Uuid,
        user_id: Uuid,
        role: ParticipantRole,
        team_id: Option<Uuid>,
        created_by: Option<Uuid>,
    ) -> Result<Participant, sqlx::Error> {
        let entity = sqlx::query_as::<_, ParticipantEntity>(
            r#"
            INSERT INTO participants (bingo_id, user_id, role, team_id, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, bingo_id, user_id, role, team_id, points,
                      deleted_at, deleted_by, created_at, updated_at, created_by
            "#,
        )
        .bind(bingo_id)
        .bind(user_id)
        .bind(ParticipantRoleDb::from(role))
        .bind(team_id)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Update a participant's role and/or team.
    pub async fn update(
        &self,
        id: Uuid,
        role: Option<ParticipantRole>,
        team_id: Option<Uuid>,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ParticipantEntity>(
            r#"
            UPDATE participants
            SET
                role = COALESCE($2, role),
                team_id = COALESCE($3, team_id),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, bingo_id, user_id, role, team_id, points,
                      deleted_at, deleted_by, created_at, updated_at, created_by
            "#,
        )
        .bind(id)
        .bind(role.map(ParticipantRoleDb::from))
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Soft-delete a participant, optionally cascading deletion of the
    /// user's tile completions for the bingo.
    ///
    /// Both writes run in one transaction so a kick with cascade either
    /// fully applies or not at all. Returns false if the row was already
    /// removed.
    pub async fn soft_delete(
        &self,
        participant: &Participant,
        deleted_by: Uuid,
        delete_tile_completions: bool,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE participants
            SET deleted_at = NOW(), deleted_by = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(participant.id)
        .bind(deleted_by)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        if delete_tile_completions {
            sqlx::query(
                r#"
                DELETE FROM tile_completions
                WHERE bingo_id = $1 AND user_id = $2
                "#,
            )
            .bind(participant.bingo_id)
            .bind(participant.user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Transfer ownership from one participant to another.
    ///
    /// Promote the new owner FIRST, then demote the old one; a same-
    /// transaction owner-count check can then never observe zero owners.
    /// The demotion is conditioned on the row still holding owner, so a
    /// retry over a half-applied state converges instead of demoting a
    /// participant who was never promoted.
    pub async fn transfer_ownership(
        &self,
        old_owner_id: Uuid,
        new_owner_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE participants
            SET role = 'owner', updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(new_owner_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE participants
            SET role = 'organizer', updated_at = NOW()
            WHERE id = $1 AND role = 'owner' AND deleted_at IS NULL
            "#,
        )
        .bind(old_owner_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await
    }

    /// Count active owners in a bingo.
    pub async fn count_owners(&self, bingo_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM participants WHERE bingo_id = $1 AND role = 'owner' AND deleted_at IS NULL",
        )
        .bind(bingo_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// List active participants of a bingo.
    pub async fn list_active(&self, bingo_id: Uuid) -> Result<Vec<Participant>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ParticipantEntity>(
            r#"
            SELECT id, bingo_id, user_id, role, team_id, points,
                   deleted_at, deleted_by, created_at, updated_at, created_by
            FROM participants
            WHERE bingo_id = $1 AND deleted_at IS NULL
            ORDER BY created_at ASC
            "#,
        )
        .bind(bingo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_db_conversion() {
        assert_eq!(
            ParticipantRoleDb::from(ParticipantRole::Owner),
            ParticipantRoleDb::Owner
        );
        assert_eq!(
            ParticipantRole::from(ParticipantRoleDb::Organizer),
            ParticipantRole::Organizer
        );
    }
}
