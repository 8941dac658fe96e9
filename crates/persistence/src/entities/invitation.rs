//! Invitation entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Invitation, InvitationStatus};
use sqlx::FromRow;
use uuid::Uuid;

use crate::entities::participant::ParticipantRoleDb;

/// Database enum for invitation_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "invitation_status", rename_all = "lowercase")]
pub enum InvitationStatusDb {
    Pending,
    Accepted,
    Declined,
    Canceled,
}

impl From<InvitationStatusDb> for InvitationStatus {
    fn from(db: InvitationStatusDb) -> Self {
        match db {
            InvitationStatusDb::Pending => Self::Pending,
            InvitationStatusDb::Accepted => Self::Accepted,
            InvitationStatusDb::Declined => Self::Declined,
            InvitationStatusDb::Canceled => Self::Canceled,
        }
    }
}

impl From<InvitationStatus> for InvitationStatusDb {
    fn from(status: InvitationStatus) -> Self {
        match status {
            InvitationStatus::Pending => Self::Pending,
            InvitationStatus::Accepted => Self::Accepted,
            InvitationStatus::Declined => Self::Declined,
            InvitationStatus::Canceled => Self::Canceled,
        }
    }
}

/// Database row mapping for the invitations table.
#[derive(Debug, Clone, FromRow)]
pub struct InvitationEntity {
    pub id: Uuid,
    pub code: String,
    pub bingo_id: Uuid,
    pub invitee_id: Option<Uuid>,
    pub role: ParticipantRoleDb,
    pub team_id: Option<Uuid>,
    pub status: InvitationStatusDb,
    pub uses: i32,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
}

impl From<InvitationEntity> for Invitation {
    fn from(entity: InvitationEntity) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            bingo_id: entity.bingo_id,
            invitee_id: entity.invitee_id,
            role: entity.role.into(),
            team_id: entity.team_id,
            status: entity.status.into(),
            uses: entity.uses,
            disabled: entity.disabled,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            created_by: entity.created_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversion_round_trip() {
        for status in [
            InvitationStatus::Pending,
            InvitationStatus::Accepted,
            InvitationStatus::Declined,
            InvitationStatus::Canceled,
        ] {
            assert_eq!(
                InvitationStatus::from(InvitationStatusDb::from(status)),
                status
            );
        }
    }

    #[test]
    fn test_entity_to_domain() {
        let entity = InvitationEntity {
            id: Uuid::new_v4(),
            code: "x".repeat(32),
            bingo_id: Uuid::new_v4(),
            invitee_id: None,
            role: ParticipantRoleDb::Participant,
            team_id: Some(Uuid::new_v4()),
            status: InvitationStatusDb::Pending,
            uses: 3,
            disabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: Uuid::new_v4(),
        };

        let invitation: Invitation = entity.clone().into();
        assert!(invitation.is_link());
        assert_eq!(invitation.uses, 3);
        assert!(invitation.disabled);
        assert_eq!(invitation.team_id, entity.team_id);
    }
}
