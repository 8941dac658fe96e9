//! Participant entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{MembershipState, Participant, ParticipantRole};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for participant_role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "participant_role", rename_all = "lowercase")]
pub enum ParticipantRoleDb {
    Participant,
    Organizer,
    Owner,
}

impl From<ParticipantRoleDb> for ParticipantRole {
    fn from(db: ParticipantRoleDb) -> Self {
        match db {
            ParticipantRoleDb::Participant => Self::Participant,
            ParticipantRoleDb::Organizer => Self::Organizer,
            ParticipantRoleDb::Owner => Self::Owner,
        }
    }
}

impl From<ParticipantRole> for ParticipantRoleDb {
    fn from(role: ParticipantRole) -> Self {
        match role {
            ParticipantRole::Participant => Self::Participant,
            ParticipantRole::Organizer => Self::Organizer,
            ParticipantRole::Owner => Self::Owner,
        }
    }
}

/// Database row mapping for the participants table.
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantEntity {
    pub id: Uuid,
    pub bingo_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRoleDb,
    pub team_id: Option<Uuid>,
    pub points: i32,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

impl From<ParticipantEntity> for Participant {
    fn from(entity: ParticipantEntity) -> Self {
        let membership = match entity.deleted_at {
            Some(at) => MembershipState::Removed {
                at,
                by: entity.deleted_by,
            },
            None => MembershipState::Active,
        };
        Self {
            id: entity.id,
            bingo_id: entity.bingo_id,
            user_id: entity.user_id,
            role: entity.role.into(),
            team_id: entity.team_id,
            points: entity.points,
            membership,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            created_by: entity.created_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(deleted_at: Option<DateTime<Utc>>) -> ParticipantEntity {
        ParticipantEntity {
            id: Uuid::new_v4(),
            bingo_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role: ParticipantRoleDb::Organizer,
            team_id: None,
            points: 120,
            deleted_at,
            deleted_by: deleted_at.map(|_| Uuid::new_v4()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: None,
        }
    }

    #[test]
    fn test_role_conversion_round_trip() {
        for role in [
            ParticipantRole::Participant,
            ParticipantRole::Organizer,
            ParticipantRole::Owner,
        ] {
            assert_eq!(ParticipantRole::from(ParticipantRoleDb::from(role)), role);
        }
    }

    #[test]
    fn test_active_row_maps_to_active_membership() {
        let participant: Participant = entity(None).into();
        assert!(participant.is_active());
        assert_eq!(participant.role, ParticipantRole::Organizer);
    }

    #[test]
    fn test_deleted_row_maps_to_removed_membership() {
        let at = Utc::now();
        let participant: Participant = entity(Some(at)).into();
        assert!(!participant.is_active());
        match participant.membership {
            MembershipState::Removed { at: removed_at, by } => {
                assert_eq!(removed_at, at);
                assert!(by.is_some());
            }
            MembershipState::Active => panic!("expected removed membership"),
        }
    }
}
