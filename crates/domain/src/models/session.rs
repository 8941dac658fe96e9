//! Session domain model.
//!
//! A session belongs to one user and optionally points at the bingo the
//! session is contextually "inside". The pointer is validated against live
//! participation when set and re-validated on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Session {
    pub uuid: Uuid,
    pub user_id: Uuid,
    /// The bingo this session is currently scoped to, if any. May be stale:
    /// readers must re-validate participation before trusting it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_bingo_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_out_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl Session {
    pub fn is_signed_out(&self) -> bool {
        self.signed_out_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_signed_out() {
        let mut session = Session {
            uuid: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            current_bingo_id: None,
            signed_out_at: None,
            created_at: Utc::now(),
            last_seen_at: Utc::now(),
        };
        assert!(!session.is_signed_out());
        session.signed_out_at = Some(Utc::now());
        assert!(session.is_signed_out());
    }
}
