//! Activity event domain models.
//!
//! Structured facts emitted to the activity log after a state transition.
//! Emission is fire-and-forget: a failed write is logged by the recorder and
//! never rolls back the transition that produced it.

use crate::models::role::ParticipantRole;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Kind of activity fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    ParticipantAdded,
    ParticipantUpdated,
    ParticipantRemoved,
    OwnershipTransferred,
    InvitationCreated,
    InvitationRedeemed,
    InvitationDeclined,
    InvitationCanceled,
    InvitationUpdated,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = match self {
            ActivityKind::ParticipantAdded => "participant.added",
            ActivityKind::ParticipantUpdated => "participant.updated",
            ActivityKind::ParticipantRemoved => "participant.removed",
            ActivityKind::OwnershipTransferred => "participant.ownership_transferred",
            ActivityKind::InvitationCreated => "invitation.created",
            ActivityKind::InvitationRedeemed => "invitation.redeemed",
            ActivityKind::InvitationDeclined => "invitation.declined",
            ActivityKind::InvitationCanceled => "invitation.canceled",
            ActivityKind::InvitationUpdated => "invitation.updated",
        };
        write!(f, "{}", key)
    }
}

/// One structured activity fact scoped to a bingo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ActivityEvent {
    pub bingo_id: Uuid,
    /// Acting user; None for system-originated facts.
    pub actor_id: Option<Uuid>,
    /// User the fact is about, when distinct from the actor.
    pub target_user_id: Option<Uuid>,
    pub kind: ActivityKind,
    pub detail: serde_json::Value,
}

impl ActivityEvent {
    pub fn participant_added(
        bingo_id: Uuid,
        actor_id: Option<Uuid>,
        user_id: Uuid,
        role: ParticipantRole,
    ) -> Self {
        Self {
            bingo_id,
            actor_id,
            target_user_id: Some(user_id),
            kind: ActivityKind::ParticipantAdded,
            detail: json!({ "role": role.to_string() }),
        }
    }

    pub fn participant_updated(
        bingo_id: Uuid,
        actor_id: Uuid,
        user_id: Uuid,
        detail: serde_json::Value,
    ) -> Self {
        Self {
            bingo_id,
            actor_id: Some(actor_id),
            target_user_id: Some(user_id),
            kind: ActivityKind::ParticipantUpdated,
            detail,
        }
    }

    pub fn participant_removed(
        bingo_id: Uuid,
        actor_id: Uuid,
        user_id: Uuid,
        completions_deleted: bool,
    ) -> Self {
        Self {
            bingo_id,
            actor_id: Some(actor_id),
            target_user_id: Some(user_id),
            kind: ActivityKind::ParticipantRemoved,
            detail: json!({ "completions_deleted": completions_deleted }),
        }
    }

    pub fn ownership_transferred(bingo_id: Uuid, old_owner_id: Uuid, new_owner_id: Uuid) -> Self {
        Self {
            bingo_id,
            actor_id: Some(old_owner_id),
            target_user_id: Some(new_owner_id),
            kind: ActivityKind::OwnershipTransferred,
            detail: json!({}),
        }
    }

    pub fn invitation_created(
        bingo_id: Uuid,
        actor_id: Uuid,
        invitation_id: Uuid,
        direct: bool,
    ) -> Self {
        Self {
            bingo_id,
            actor_id: Some(actor_id),
            target_user_id: None,
            kind: ActivityKind::InvitationCreated,
            detail: json!({ "invitation_id": invitation_id, "direct": direct }),
        }
    }

    pub fn invitation_redeemed(bingo_id: Uuid, invitation_id: Uuid, user_id: Uuid) -> Self {
        Self {
            bingo_id,
            actor_id: Some(user_id),
            target_user_id: Some(user_id),
            kind: ActivityKind::InvitationRedeemed,
            detail: json!({ "invitation_id": invitation_id }),
        }
    }

    pub fn invitation_declined(bingo_id: Uuid, invitation_id: Uuid, user_id: Uuid) -> Self {
        Self {
            bingo_id,
            actor_id: Some(user_id),
            target_user_id: Some(user_id),
            kind: ActivityKind::InvitationDeclined,
            detail: json!({ "invitation_id": invitation_id }),
        }
    }

    pub fn invitation_canceled(bingo_id: Uuid, actor_id: Uuid, invitation_id: Uuid) -> Self {
        Self {
            bingo_id,
            actor_id: Some(actor_id),
            target_user_id: None,
            kind: ActivityKind::InvitationCanceled,
            detail: json!({ "invitation_id": invitation_id }),
        }
    }

    pub fn invitation_updated(bingo_id: Uuid, actor_id: Uuid, invitation_id: Uuid) -> Self {
        Self {
            bingo_id,
            actor_id: Some(actor_id),
            target_user_id: None,
            kind: ActivityKind::InvitationUpdated,
            detail: json!({ "invitation_id": invitation_id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(
            ActivityKind::ParticipantAdded.to_string(),
            "participant.added"
        );
        assert_eq!(
            ActivityKind::OwnershipTransferred.to_string(),
            "participant.ownership_transferred"
        );
        assert_eq!(
            ActivityKind::InvitationRedeemed.to_string(),
            "invitation.redeemed"
        );
    }

    #[test]
    fn test_participant_added_event() {
        let bingo_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let event = ActivityEvent::participant_added(
            bingo_id,
            None,
            user_id,
            ParticipantRole::Organizer,
        );

        assert_eq!(event.kind, ActivityKind::ParticipantAdded);
        assert_eq!(event.target_user_id, Some(user_id));
        assert_eq!(event.detail["role"], "organizer");
    }

    #[test]
    fn test_ownership_transferred_event() {
        let old_owner = Uuid::new_v4();
        let new_owner = Uuid::new_v4();

        let event = ActivityEvent::ownership_transferred(Uuid::new_v4(), old_owner, new_owner);

        assert_eq!(event.actor_id, Some(old_owner));
        assert_eq!(event.target_user_id, Some(new_owner));
    }

    #[test]
    fn test_removed_event_records_cascade() {
        let event =
            ActivityEvent::participant_removed(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), true);
        assert_eq!(event.detail["completions_deleted"], true);
    }
}
