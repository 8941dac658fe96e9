//! Invitation domain model and state machine.
//!
//! An invitation grants join rights to one bingo. With a target invitee it
//! is a single-use direct invite, consumed on first redemption; without one
//! it is a reusable link that any number of distinct users may redeem while
//! it stays pending and enabled. The `disabled` flag suppresses a link
//! without touching its status or usage history.

use crate::models::role::ParticipantRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// Settlement status of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    Canceled,
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvitationStatus::Pending => write!(f, "pending"),
            InvitationStatus::Accepted => write!(f, "accepted"),
            InvitationStatus::Declined => write!(f, "declined"),
            InvitationStatus::Canceled => write!(f, "canceled"),
        }
    }
}

/// A state transition was requested that the invitation's current state
/// does not permit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvitationStateError {
    #[error("invitation is disabled")]
    Disabled,
    #[error("invitation is already {0}")]
    AlreadySettled(InvitationStatus),
    #[error("invitation is addressed to a different user")]
    NotAddressedToUser,
    #[error("operation applies only to direct invitations")]
    DirectOnly,
    #[error("operation applies only to link invitations")]
    LinkOnly,
}

/// Invitation domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Invitation {
    pub id: Uuid,
    /// Opaque bearer code; unique across all invitations.
    pub code: String,
    pub bingo_id: Uuid,
    /// Present for a single-use direct invite; absent for a reusable link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitee_id: Option<Uuid>,
    pub role: ParticipantRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<Uuid>,
    pub status: InvitationStatus,
    /// Number of successful redemptions.
    pub uses: i32,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
}

impl Invitation {
    pub fn is_direct(&self) -> bool {
        self.invitee_id.is_some()
    }

    pub fn is_link(&self) -> bool {
        self.invitee_id.is_none()
    }

    /// Redeems the invitation for `user_id`.
    ///
    /// A direct invite must still be pending, enabled, and addressed to the
    /// redeeming user; redemption consumes it (status becomes Accepted). A
    /// link must be pending and enabled; it stays pending afterwards. Both
    /// forms count the redemption in `uses`. The caller persists this
    /// mutation atomically with the participant it creates.
    pub fn redeem(&mut self, user_id: Uuid) -> Result<(), InvitationStateError> {
        if self.disabled {
            return Err(InvitationStateError::Disabled);
        }
        if self.status != InvitationStatus::Pending {
            return Err(InvitationStateError::AlreadySettled(self.status));
        }
        if let Some(invitee_id) = self.invitee_id {
            if invitee_id != user_id {
                return Err(InvitationStateError::NotAddressedToUser);
            }
            self.status = InvitationStatus::Accepted;
        }
        self.uses += 1;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Declines a pending direct invitation. Links cannot be declined.
    pub fn decline(&mut self, user_id: Uuid) -> Result<(), InvitationStateError> {
        let invitee_id = self.invitee_id.ok_or(InvitationStateError::DirectOnly)?;
        if invitee_id != user_id {
            return Err(InvitationStateError::NotAddressedToUser);
        }
        if self.status != InvitationStatus::Pending {
            return Err(InvitationStateError::AlreadySettled(self.status));
        }
        self.status = InvitationStatus::Declined;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Cancels a pending invitation of either form. Terminal for the code.
    pub fn cancel(&mut self) -> Result<(), InvitationStateError> {
        if self.status != InvitationStatus::Pending {
            return Err(InvitationStateError::AlreadySettled(self.status));
        }
        self.status = InvitationStatus::Canceled;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Toggles the `disabled` flag on a pending link. Status and `uses`
    /// are untouched, so re-enabling restores redemption with history
    /// intact. Direct invitations cannot be disabled.
    pub fn set_disabled(&mut self, disabled: bool) -> Result<(), InvitationStateError> {
        if self.is_direct() {
            return Err(InvitationStateError::LinkOnly);
        }
        if self.status != InvitationStatus::Pending {
            return Err(InvitationStateError::AlreadySettled(self.status));
        }
        self.disabled = disabled;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Updates a pending link's target role and/or team. Direct invitations
    /// and settled invitations are immutable.
    pub fn update_link(
        &mut self,
        role: Option<ParticipantRole>,
        team_id: Option<Uuid>,
    ) -> Result<(), InvitationStateError> {
        if self.is_direct() {
            return Err(InvitationStateError::LinkOnly);
        }
        if self.status != InvitationStatus::Pending {
            return Err(InvitationStateError::AlreadySettled(self.status));
        }
        if let Some(role) = role {
            self.role = role;
        }
        if let Some(team_id) = team_id {
            self.team_id = Some(team_id);
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Request to create an invitation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateInvitationRequest {
    /// Role granted on redemption.
    #[validate(custom(function = "validate_role_token"))]
    pub role: String,
    /// Team assigned on redemption, resolved by name within the bingo.
    #[validate(length(min = 1, max = 64, message = "Team name must be 1-64 characters"))]
    pub team_name: Option<String>,
    /// Target username for a direct invitation; omit for a reusable link.
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: Option<String>,
}

/// Request to update a pending link invitation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateInvitationRequest {
    #[validate(custom(function = "validate_role_token"))]
    pub role: Option<String>,
    #[validate(length(min = 1, max = 64, message = "Team name must be 1-64 characters"))]
    pub team_name: Option<String>,
}

fn validate_role_token(role: &str) -> Result<(), validator::ValidationError> {
    if role.parse::<ParticipantRole>().is_ok() {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("invalid_role");
        err.message = Some("Role must be 'participant', 'organizer' or 'owner'".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct_invitation(invitee_id: Uuid) -> Invitation {
        Invitation {
            id: Uuid::new_v4(),
            code: "c".repeat(32),
            bingo_id: Uuid::new_v4(),
            invitee_id: Some(invitee_id),
            role: ParticipantRole::Participant,
            team_id: None,
            status: InvitationStatus::Pending,
            uses: 0,
            disabled: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: Uuid::new_v4(),
        }
    }

    fn link_invitation() -> Invitation {
        Invitation {
            invitee_id: None,
            ..direct_invitation(Uuid::new_v4())
        }
    }

    #[test]
    fn test_direct_redeem_consumes() {
        let invitee = Uuid::new_v4();
        let mut invitation = direct_invitation(invitee);

        invitation.redeem(invitee).unwrap();
        assert_eq!(invitation.status, InvitationStatus::Accepted);
        assert_eq!(invitation.uses, 1);

        // Second redemption fails and does not count.
        let err = invitation.redeem(invitee).unwrap_err();
        assert_eq!(
            err,
            InvitationStateError::AlreadySettled(InvitationStatus::Accepted)
        );
        assert_eq!(invitation.uses, 1);
    }

    #[test]
    fn test_direct_redeem_wrong_user() {
        let mut invitation = direct_invitation(Uuid::new_v4());
        let err = invitation.redeem(Uuid::new_v4()).unwrap_err();
        assert_eq!(err, InvitationStateError::NotAddressedToUser);
        assert_eq!(invitation.status, InvitationStatus::Pending);
        assert_eq!(invitation.uses, 0);
    }

    #[test]
    fn test_link_redeem_stays_pending() {
        let mut invitation = link_invitation();

        invitation.redeem(Uuid::new_v4()).unwrap();
        invitation.redeem(Uuid::new_v4()).unwrap();

        assert_eq!(invitation.status, InvitationStatus::Pending);
        assert_eq!(invitation.uses, 2);
    }

    #[test]
    fn test_disabled_link_rejects_redeem() {
        let mut invitation = link_invitation();
        invitation.set_disabled(true).unwrap();

        let err = invitation.redeem(Uuid::new_v4()).unwrap_err();
        assert_eq!(err, InvitationStateError::Disabled);
        assert_eq!(invitation.uses, 0);

        // Re-enabling restores redemption with history intact.
        invitation.set_disabled(false).unwrap();
        invitation.redeem(Uuid::new_v4()).unwrap();
        assert_eq!(invitation.uses, 1);
    }

    #[test]
    fn test_disable_direct_rejected() {
        let mut invitation = direct_invitation(Uuid::new_v4());
        assert_eq!(
            invitation.set_disabled(true).unwrap_err(),
            InvitationStateError::LinkOnly
        );
    }

    #[test]
    fn test_decline_direct() {
        let invitee = Uuid::new_v4();
        let mut invitation = direct_invitation(invitee);

        invitation.decline(invitee).unwrap();
        assert_eq!(invitation.status, InvitationStatus::Declined);

        // Declined is terminal for redemption too.
        assert_eq!(
            invitation.redeem(invitee).unwrap_err(),
            InvitationStateError::AlreadySettled(InvitationStatus::Declined)
        );
    }

    #[test]
    fn test_decline_link_rejected() {
        let mut invitation = link_invitation();
        assert_eq!(
            invitation.decline(Uuid::new_v4()).unwrap_err(),
            InvitationStateError::DirectOnly
        );
    }

    #[test]
    fn test_decline_wrong_user() {
        let mut invitation = direct_invitation(Uuid::new_v4());
        assert_eq!(
            invitation.decline(Uuid::new_v4()).unwrap_err(),
            InvitationStateError::NotAddressedToUser
        );
    }

    #[test]
    fn test_cancel_is_terminal() {
        let mut invitation = link_invitation();
        invitation.cancel().unwrap();
        assert_eq!(invitation.status, InvitationStatus::Canceled);

        assert!(invitation.cancel().is_err());
        assert!(invitation.redeem(Uuid::new_v4()).is_err());
        assert!(invitation.set_disabled(true).is_err());
        assert!(invitation
            .update_link(Some(ParticipantRole::Organizer), None)
            .is_err());
    }

    #[test]
    fn test_update_link() {
        let mut invitation = link_invitation();
        let team_id = Uuid::new_v4();

        invitation
            .update_link(Some(ParticipantRole::Organizer), Some(team_id))
            .unwrap();

        assert_eq!(invitation.role, ParticipantRole::Organizer);
        assert_eq!(invitation.team_id, Some(team_id));
    }

    #[test]
    fn test_update_direct_rejected() {
        let mut invitation = direct_invitation(Uuid::new_v4());
        assert_eq!(
            invitation
                .update_link(Some(ParticipantRole::Organizer), None)
                .unwrap_err(),
            InvitationStateError::LinkOnly
        );
    }

    #[test]
    fn test_create_request_validation() {
        let valid = CreateInvitationRequest {
            role: "participant".to_string(),
            team_name: Some("Red".to_string()),
            username: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateInvitationRequest {
            role: "superadmin".to_string(),
            team_name: None,
            username: None,
        };
        assert!(invalid.validate().is_err());
    }
}
