//! Invitation repository for database operations.

use domain::models::{Invitation, Participant, ParticipantRole};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::invitation::{InvitationEntity, InvitationStatusDb};
use crate::entities::participant::{ParticipantEntity, ParticipantRoleDb};
use crate::metrics::QueryTimer;

/// Repository for invitation database operations.
#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an invitation. `invitee_id` present makes it a single-use
    /// direct invite; absent makes it a reusable link.
    pub async fn create(
        &self,
        bingo_id: Uuid,
        code: &str,
        invitee_id: Option<Uuid>,
        role: ParticipantRole,
        team_id: Option<Uuid>,
        created_by: Uuid,
    ) -> Result<Invitation, sqlx::Error> {
        let entity = sqlx::query_as::<_, InvitationEntity>(
            r#"
            INSERT INTO invitations (bingo_id, code, invitee_id, role, team_id, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, code, bingo_id, invitee_id, role, team_id, status, uses,
                      disabled, created_at, updated_at, created_by
            "#,
        )
        .bind(bingo_id)
        .bind(code)
        .bind(invitee_id)
        .bind(ParticipantRoleDb::from(role))
        .bind(team_id)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find an invitation by its code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Invitation>, sqlx::Error> {
        let timer = QueryTimer::new("invitation_find_by_code");
        let entity = sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT id, code, bingo_id, invitee_id, role, team_id, status, uses,
                   disabled, created_at, updated_at, created_by
            FROM invitations
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();

        Ok(entity.map(Into::into))
    }

    /// Persist the settled state of an invitation after a pure transition
    /// (cancel, decline, disable toggle, link update).
    ///
    /// Returns false if the row vanished underneath us.
    pub async fn save_state(&self, invitation: &Invitation) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET status = $2, uses = $3, disabled = $4, role = $5, team_id = $6,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(invitation.id)
        .bind(InvitationStatusDb::from(invitation.status))
        .bind(invitation.uses)
        .bind(invitation.disabled)
        .bind(ParticipantRoleDb::from(invitation.role))
        .bind(invitation.team_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Atomically persist a redemption and create the participant it grants.
    ///
    /// `redeemed` is the invitation AFTER the domain transition (uses
    /// incremented, direct invites flipped to accepted). The update is
    /// guarded on the row still being pending, enabled, and at the
    /// pre-redemption usage count, so a concurrent redemption of a direct
    /// invite loses the race here instead of double-consuming. Both writes
    /// commit together; if the participant insert fails (e.g. the user is
    /// already an active member) the usage count and status are untouched.
    ///
    /// Returns `Ok(None)` when the guard misses (concurrent state change).
    pub async fn redeem_and_join(
        &self,
        redeemed: &Invitation,
        user_id: Uuid,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE invitations
            SET status = $2, uses = $3, updated_at = NOW()
            WHERE id = $1 AND status = 'pending' AND disabled = FALSE AND uses = $4
            "#,
        )
        .bind(redeemed.id)
        .bind(InvitationStatusDb::from(redeemed.status))
        .bind(redeemed.uses)
        .bind(redeemed.uses - 1)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        let entity = sqlx::query_as::<_, ParticipantEntity>(
            r#"
            INSERT INTO participants (bingo_id, user_id, role, team_id, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, bingo_id, user_id, role, team_id, points,
                      deleted_at, deleted_by, created_at, updated_at, created_by
            "#,
        )
        .bind(redeemed.bingo_id)
        .bind(user_id)
        .bind(ParticipantRoleDb::from(redeemed.role))
        .bind(redeemed.team_id)
        .bind(redeemed.created_by)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(entity.into()))
    }

    /// List invitations of a bingo, newest first.
    pub async fn list_for_bingo(&self, bingo_id: Uuid) -> Result<Vec<Invitation>, sqlx::Error> {
        let entities = sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT id, code, bingo_id, invitee_id, role, team_id, status, uses,
                   disabled, created_at, updated_at, created_by
            FROM invitations
            WHERE bingo_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(bingo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Check whether a pending direct invitation already exists for a user.
    pub async fn has_pending_direct(
        &self,
        bingo_id: Uuid,
        invitee_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM invitations WHERE bingo_id = $1 AND invitee_id = $2 AND status = 'pending')",
        )
        .bind(bingo_id)
        .bind(invitee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::InvitationStatus;

    #[test]
    fn test_status_db_conversion() {
        assert_eq!(
            InvitationStatusDb::from(InvitationStatus::Pending),
            InvitationStatusDb::Pending
        );
        assert_eq!(
            InvitationStatus::from(InvitationStatusDb::Canceled),
            InvitationStatus::Canceled
        );
    }
}
