//! Team entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Team;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the teams table.
#[derive(Debug, Clone, FromRow)]
pub struct TeamEntity {
    pub id: Uuid,
    pub bingo_id: Uuid,
    pub name: String,
    pub name_normalized: String,
    pub captain_id: Option<Uuid>,
    pub points: i32,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeamEntity> for Team {
    fn from(entity: TeamEntity) -> Self {
        Self {
            id: entity.id,
            bingo_id: entity.bingo_id,
            name: entity.name,
            name_normalized: entity.name_normalized,
            captain_id: entity.captain_id,
            points: entity.points,
            deleted_at: entity.deleted_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_to_domain() {
        let entity = TeamEntity {
            id: Uuid::new_v4(),
            bingo_id: Uuid::new_v4(),
            name: "Red Team".to_string(),
            name_normalized: "red team".to_string(),
            captain_id: None,
            points: 40,
            deleted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let team: Team = entity.into();
        assert_eq!(team.name_normalized, "red team");
        assert!(!team.is_deleted());
        assert!(team.captain_id.is_none());
    }
}
