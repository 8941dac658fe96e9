//! Participant domain model.
//!
//! A participant is a user's membership record in one bingo, carrying a role
//! and optional team. Membership is an explicit lifecycle state rather than
//! a nullable timestamp: a pair is `NonExistent` (no row), `Active`, or
//! `Removed`. Removal is final for the row; rejoining creates a fresh
//! `Active` row with points reset to zero.

use crate::models::role::ParticipantRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle state of a membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum MembershipState {
    Active,
    Removed {
        at: DateTime<Utc>,
        by: Option<Uuid>,
    },
}

impl MembershipState {
    pub fn is_active(&self) -> bool {
        matches!(self, MembershipState::Active)
    }
}

/// Participant domain model: one (user, bingo) membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Participant {
    pub id: Uuid,
    pub bingo_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<Uuid>,
    pub points: i32,
    pub membership: MembershipState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
}

impl Participant {
    /// The single visibility predicate: only active rows count as
    /// participation anywhere in the core.
    pub fn is_active(&self) -> bool {
        self.membership.is_active()
    }
}

/// Request to update a participant's role and/or team.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateParticipantRequest {
    /// Role token ("participant", "organizer", "owner"); parsed and
    /// validated before any authorization check.
    #[validate(length(min = 1, max = 32, message = "Role must be 1-32 characters"))]
    pub role: Option<String>,
    #[validate(length(min = 1, max = 64, message = "Team name must be 1-64 characters"))]
    pub team_name: Option<String>,
}

impl UpdateParticipantRequest {
    pub fn is_role_change(&self) -> bool {
        self.role.is_some()
    }
}

/// Options for removing a participant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoveParticipantOptions {
    /// Also delete the target's tile completions for this bingo. Destructive
    /// and irreversible, so it must be requested explicitly.
    #[serde(default)]
    pub delete_tile_completions: bool,
}

/// Applies the ownership-transfer transition to a pair of participants.
///
/// Promotes `new_owner` and demotes `current_owner` to organizer as one
/// step. The transition is idempotent: re-applying it (including over a
/// half-applied state where only the promotion landed) converges on the
/// same end state with exactly one owner.
pub fn apply_ownership_transfer(current_owner: &mut Participant, new_owner: &mut Participant) {
    new_owner.role = ParticipantRole::Owner;
    if current_owner.id != new_owner.id {
        current_owner.role = ParticipantRole::Organizer;
    }
}
