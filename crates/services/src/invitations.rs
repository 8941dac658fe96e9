//! Invitation lifecycle service.
//!
//! The state machine itself lives on the domain model; this service wires
//! it to storage and authorization. Redemption persists the transition and
//! the participant it grants in one transaction, so a failed join leaves
//! the invitation's status and usage count untouched.

use chrono::Utc;
use domain::models::{
    ActivityEvent, CreateInvitationRequest, Invitation, Participant, ParticipantRole,
    UpdateInvitationRequest, User,
};
use domain::services::authorization::Actor;
use persistence::repositories::{
    BingoRepository, InvitationRepository, ParticipantRepository, TeamRepository, UserRepository,
};
use shared::codes::generate_invitation_code;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::activity::ActivityRecorder;
use crate::error::ServiceError;

/// Service for invitation lifecycle operations.
#[derive(Clone)]
pub struct InvitationService {
    bingos: BingoRepository,
    users: UserRepository,
    participants: ParticipantRepository,
    teams: TeamRepository,
    invitations: InvitationRepository,
    activity: ActivityRecorder,
}

impl InvitationService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bingos: BingoRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            participants: ParticipantRepository::new(pool.clone()),
            teams: TeamRepository::new(pool.clone()),
            invitations: InvitationRepository::new(pool.clone()),
            activity: ActivityRecorder::new(pool),
        }
    }

    async fn actor_for(&self, user: &User, bingo_id: Uuid) -> Result<Actor, ServiceError> {
        let row = self.participants.find_active(bingo_id, user.id).await?;
        Ok(Actor::for_user(user, row.as_ref()))
    }

    /// Organizer rank (or the global permission) gates every invitation
    /// management operation.
    fn require_manager(&self, actor: &Actor, what: &str) -> Result<(), ServiceError> {
        if actor.is_moderator || actor.has_at_least(ParticipantRole::Organizer) {
            Ok(())
        } else {
            warn!(user_id = %actor.user_id, "Invitation {} denied", what);
            Err(ServiceError::Forbidden(
                "You are not allowed to manage invitations for this bingo".into(),
            ))
        }
    }

    /// Creates an invitation: a single-use direct invite when a username is
    /// given, otherwise a reusable link.
    pub async fn create(
        &self,
        requester: &User,
        bingo_id: Uuid,
        request: CreateInvitationRequest,
    ) -> Result<Invitation, ServiceError> {
        request.validate()?;

        let bingo = self
            .bingos
            .find_by_id(bingo_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Bingo not found".into()))?;
        if !bingo.accepts_registrations(Utc::now()) {
            return Err(ServiceError::Conflict(
                "Bingo is not accepting new participants".into(),
            ));
        }

        let actor = self.actor_for(requester, bingo_id).await?;
        self.require_manager(&actor, "creation")?;

        let role = request
            .role
            .parse::<ParticipantRole>()
            .map_err(ServiceError::Validation)?;

        let team_id = match request.team_name.as_deref() {
            Some(name) => Some(
                self.teams
                    .find_by_name(bingo_id, name)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("Team not found".into()))?
                    .id,
            ),
            None => None,
        };

        let invitee_id = match request.username.as_deref() {
            Some(username) => {
                let invitee = self
                    .users
                    .find_by_username(username)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
                if self.participants.exists_active(bingo_id, invitee.id).await? {
                    return Err(ServiceError::Conflict(
                        "User is already a participant of this bingo".into(),
                    ));
                }
                if self
                    .invitations
                    .has_pending_direct(bingo_id, invitee.id)
                    .await?
                {
                    return Err(ServiceError::Conflict(
                        "A pending invitation already exists for this user".into(),
                    ));
                }
                Some(invitee.id)
            }
            None => None,
        };

        let code = generate_invitation_code();
        let invitation = self
            .invitations
            .create(bingo_id, &code, invitee_id, role, team_id, requester.id)
            .await?;

        info!(
            requester = %requester.username,
            %bingo_id,
            invitation_id = %invitation.id,
            direct = invitation.is_direct(),
            role = %role,
            "Invitation created"
        );
        self.activity.record(ActivityEvent::invitation_created(
            bingo_id,
            requester.id,
            invitation.id,
            invitation.is_direct(),
        ));

        Ok(invitation)
    }

    /// Redeems an invitation code, joining the redeeming user to the bingo
    /// with the invitation's role and team.
    pub async fn redeem(&self, code: &str, user: &User) -> Result<Participant, ServiceError> {
        let mut invitation = self
            .invitations
            .find_by_code(code)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Invitation not found".into()))?;

        if self
            .participants
            .exists_active(invitation.bingo_id, user.id)
            .await?
        {
            return Err(ServiceError::Conflict(
                "You are already a participant of this bingo".into(),
            ));
        }

        invitation.redeem(user.id)?;

        let participant = self
            .invitations
            .redeem_and_join(&invitation, user.id)
            .await?
            .ok_or_else(|| {
                ServiceError::Conflict("Invitation was redeemed concurrently".into())
            })?;

        info!(
            user = %user.username,
            bingo_id = %invitation.bingo_id,
            invitation_id = %invitation.id,
            uses = invitation.uses,
            "Invitation redeemed"
        );
        self.activity.record(ActivityEvent::invitation_redeemed(
            invitation.bingo_id,
            invitation.id,
            user.id,
        ));

        Ok(participant)
    }

    /// Declines a pending direct invitation addressed to the user.
    pub async fn decline(&self, code: &str, user: &User) -> Result<(), ServiceError> {
        let mut invitation = self
            .invitations
            .find_by_code(code)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Invitation not found".into()))?;

        invitation.decline(user.id)?;
        self.save_settled(&invitation).await?;

        info!(
            user = %user.username,
            invitation_id = %invitation.id,
            "Invitation declined"
        );
        self.activity.record(ActivityEvent::invitation_declined(
            invitation.bingo_id,
            invitation.id,
            user.id,
        ));

        Ok(())
    }

    /// Cancels a pending invitation of either form. Terminal.
    pub async fn cancel(&self, requester: &User, code: &str) -> Result<(), ServiceError> {
        let mut invitation = self
            .invitations
            .find_by_code(code)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Invitation not found".into()))?;

        let actor = self.actor_for(requester, invitation.bingo_id).await?;
        self.require_manager(&actor, "cancellation")?;

        invitation.cancel()?;
        self.save_settled(&invitation).await?;

        info!(
            requester = %requester.username,
            invitation_id = %invitation.id,
            "Invitation canceled"
        );
        self.activity.record(ActivityEvent::invitation_canceled(
            invitation.bingo_id,
            requester.id,
            invitation.id,
        ));

        Ok(())
    }

    /// Toggles the disabled flag on a link invitation. Status and usage
    /// history are untouched, so a re-enabled link picks up where it left
    /// off.
    pub async fn set_disabled(
        &self,
        requester: &User,
        code: &str,
        disabled: bool,
    ) -> Result<Invitation, ServiceError> {
        let mut invitation = self
            .invitations
            .find_by_code(code)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Invitation not found".into()))?;

        let actor = self.actor_for(requester, invitation.bingo_id).await?;
        self.require_manager(&actor, "disable toggle")?;

        invitation.set_disabled(disabled)?;
        self.save_settled(&invitation).await?;

        info!(
            requester = %requester.username,
            invitation_id = %invitation.id,
            disabled,
            "Invitation disabled flag changed"
        );

        Ok(invitation)
    }

    /// Updates a pending link's target role and/or team.
    pub async fn update_link(
        &self,
        requester: &User,
        code: &str,
        request: UpdateInvitationRequest,
    ) -> Result<Invitation, ServiceError> {
        request.validate()?;

        let mut invitation = self
            .invitations
            .find_by_code(code)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Invitation not found".into()))?;

        let actor = self.actor_for(requester, invitation.bingo_id).await?;
        self.require_manager(&actor, "update")?;

        let role = request
            .role
            .as_deref()
            .map(str::parse::<ParticipantRole>)
            .transpose()
            .map_err(ServiceError::Validation)?;

        let team_id = match request.team_name.as_deref() {
            Some(name) => Some(
                self.teams
                    .find_by_name(invitation.bingo_id, name)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("Team not found".into()))?
                    .id,
            ),
            None => None,
        };

        invitation.update_link(role, team_id)?;
        self.save_settled(&invitation).await?;

        info!(
            requester = %requester.username,
            invitation_id = %invitation.id,
            "Invitation updated"
        );
        self.activity.record(ActivityEvent::invitation_updated(
            invitation.bingo_id,
            requester.id,
            invitation.id,
        ));

        Ok(invitation)
    }

    async fn save_settled(&self, invitation: &Invitation) -> Result<(), ServiceError> {
        if !self.invitations.save_state(invitation).await? {
            return Err(ServiceError::Conflict(
                "Invitation was modified concurrently".into(),
            ));
        }
        Ok(())
    }
}
