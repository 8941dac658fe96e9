//! Session entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Session;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the sessions table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionEntity {
    pub uuid: Uuid,
    pub user_id: Uuid,
    pub current_bingo_id: Option<Uuid>,
    pub signed_out_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl From<SessionEntity> for Session {
    fn from(entity: SessionEntity) -> Self {
        Self {
            uuid: entity.uuid,
            user_id: entity.user_id,
            current_bingo_id: entity.current_bingo_id,
            signed_out_at: entity.signed_out_at,
            created_at: entity.created_at,
            last_seen_at: entity.last_seen_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_to_domain() {
        let bingo_id = Uuid::new_v4();
        let entity = SessionEntity {
            uuid: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            current_bingo_id: Some(bingo_id),
            signed_out_at: None,
            created_at: Utc::now(),
            last_seen_at: Utc::now(),
        };

        let session: Session = entity.into();
        assert_eq!(session.current_bingo_id, Some(bingo_id));
        assert!(!session.is_signed_out());
    }
}
