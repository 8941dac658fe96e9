//! Team domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_team_name;
use uuid::Uuid;
use validator::Validate;

/// Team domain model. A team belongs to exactly one bingo; its normalized
/// name is unique among that bingo's non-deleted teams.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Team {
    pub id: Uuid,
    pub bingo_id: Uuid,
    pub name: String,
    pub name_normalized: String,
    /// Optional captain; a team may be leaderless.
    pub captain_id: Option<Uuid>,
    pub points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Request to create a team within a bingo.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTeamRequest {
    #[validate(custom(function = "validate_team_name"))]
    pub name: String,
}
