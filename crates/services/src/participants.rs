//! Participant lifecycle service.
//!
//! Every state change here follows the same shape: resolve current rows,
//! evaluate the pure authorization policy, persist, emit an activity fact.
//! Not-found, validation, authorization, and invalid-state failures stay
//! distinct all the way to the caller.

use chrono::Utc;
use domain::models::{
    ActivityEvent, Participant, ParticipantRole, RemoveParticipantOptions,
    UpdateParticipantRequest, User,
};
use domain::services::authorization::{
    can_remove_participant, can_transfer_ownership, can_update_participant, Actor,
};
use persistence::repositories::{
    BingoRepository, ParticipantRepository, TeamRepository, UserRepository,
};
use serde_json::json;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::activity::ActivityRecorder;
use crate::error::ServiceError;

/// Service for participant lifecycle operations.
#[derive(Clone)]
pub struct ParticipantService {
    bingos: BingoRepository,
    users: UserRepository,
    participants: ParticipantRepository,
    teams: TeamRepository,
    activity: ActivityRecorder,
}

impl ParticipantService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bingos: BingoRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            participants: ParticipantRepository::new(pool.clone()),
            teams: TeamRepository::new(pool.clone()),
            activity: ActivityRecorder::new(pool),
        }
    }

    /// Builds the requester's capability value for one bingo.
    async fn actor_for(&self, user: &User, bingo_id: Uuid) -> Result<Actor, ServiceError> {
        let row = self.participants.find_active(bingo_id, user.id).await?;
        Ok(Actor::for_user(user, row.as_ref()))
    }

    /// Adds a user to a bingo as an active participant.
    ///
    /// Used by direct adds and by the owner bootstrap when a bingo is
    /// created. A previously removed user lands here on rejoin and gets a
    /// fresh row with zero points.
    pub async fn add(
        &self,
        bingo_id: Uuid,
        user_id: Uuid,
        role: ParticipantRole,
        team_id: Option<Uuid>,
        added_by: Option<Uuid>,
    ) -> Result<Participant, ServiceError> {
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
        if self.participants.exists_active(bingo_id, user_id).await? {
            return Err(ServiceError::Conflict(
                "User is already a participant of this bingo".into(),
            ));
        }

        let participant = self
            .participants
            .create(bingo_id, user_id, role, team_id, added_by)
            .await?;

        info!(%bingo_id, %user_id, role = %role, "Participant added");
        self.activity
            .record(ActivityEvent::participant_added(bingo_id, added_by, user_id, role));

        Ok(participant)
    }

    /// Updates a participant's role and/or team.
    ///
    /// Role and team edits are only valid while the bingo is pending. A
    /// role change requires owner rank; below that, organizers manage
    /// peers-or-below and anyone may adjust themselves.
    pub async fn update(
        &self,
        requester: &User,
        bingo_id: Uuid,
        target_username: &str,
        request: UpdateParticipantRequest,
    ) -> Result<Participant, ServiceError> {
        request.validate()?;

        let bingo = self
            .bingos
            .find_by_id(bingo_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Bingo not found".into()))?;
        if !bingo.is_pending() {
            return Err(ServiceError::Conflict(
                "Participants can only be edited while the bingo is pending".into(),
            ));
        }

        let target_user = self
            .users
            .find_by_username(target_username)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
        let target = self
            .participants
            .find_active(bingo_id, target_user.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Participant not found".into()))?;

        let team = match request.team_name.as_deref() {
            Some(name) => Some(
                self.teams
                    .find_by_name(bingo_id, name)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("Team not found".into()))?,
            ),
            None => None,
        };

        let new_role = request
            .role
            .as_deref()
            .map(str::parse::<ParticipantRole>)
            .transpose()
            .map_err(ServiceError::Validation)?;

        let actor = self.actor_for(requester, bingo_id).await?;
        if !can_update_participant(&actor, &target, new_role.is_some()) {
            warn!(
                requester = %requester.username,
                target = %target_username,
                %bingo_id,
                role_change = new_role.is_some(),
                "Participant update denied"
            );
            return Err(ServiceError::Forbidden(
                "You are not allowed to update this participant".into(),
            ));
        }

        let updated = self
            .participants
            .update(target.id, new_role, team.as_ref().map(|t| t.id))
            .await?
            .ok_or_else(|| {
                ServiceError::Conflict("Participant was removed concurrently".into())
            })?;

        info!(
            requester = %requester.username,
            target = %target_username,
            %bingo_id,
            "Participant updated"
        );
        self.activity.record(ActivityEvent::participant_updated(
            bingo_id,
            requester.id,
            target_user.id,
            json!({
                "role": new_role.map(|r| r.to_string()),
                "team": team.as_ref().map(|t| t.name.clone()),
            }),
        ));

        Ok(updated)
    }

    /// Removes a participant (kick or self-leave) by soft deletion.
    ///
    /// Tile completions survive unless their deletion is explicitly
    /// requested; that cascade is irreversible.
    pub async fn remove(
        &self,
        requester: &User,
        bingo_id: Uuid,
        target_username: &str,
        options: RemoveParticipantOptions,
    ) -> Result<(), ServiceError> {
        let target_user = self
            .users
            .find_by_username(target_username)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
        let target = self
            .participants
            .find_active(bingo_id, target_user.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Participant not found".into()))?;

        let actor = self.actor_for(requester, bingo_id).await?;
        if !can_remove_participant(&actor, &target) {
            warn!(
                requester = %requester.username,
                target = %target_username,
                %bingo_id,
                "Participant removal denied"
            );
            return Err(ServiceError::Forbidden(
                "You are not allowed to remove this participant".into(),
            ));
        }

        let removed = self
            .participants
            .soft_delete(&target, requester.id, options.delete_tile_completions)
            .await?;
        if !removed {
            return Err(ServiceError::Conflict(
                "Participant was removed concurrently".into(),
            ));
        }

        info!(
            requester = %requester.username,
            target = %target_username,
            %bingo_id,
            completions_deleted = options.delete_tile_completions,
            "Participant removed"
        );
        self.activity.record(ActivityEvent::participant_removed(
            bingo_id,
            requester.id,
            target_user.id,
            options.delete_tile_completions,
        ));

        Ok(())
    }

    /// Transfers bingo ownership to another active participant.
    ///
    /// The requester ends up organizer, the target owner, both in one
    /// transaction; there is never a moment with zero or two committed
    /// owners.
    pub async fn transfer_ownership(
        &self,
        requester: &User,
        bingo_id: Uuid,
        new_owner_username: &str,
    ) -> Result<(), ServiceError> {
        self.bingos
            .find_by_id(bingo_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Bingo not found".into()))?;

        let requester_row = self
            .participants
            .find_active(bingo_id, requester.id)
            .await?;
        let actor = Actor::for_user(requester, requester_row.as_ref());
        if !can_transfer_ownership(&actor) {
            warn!(
                requester = %requester.username,
                %bingo_id,
                "Ownership transfer denied"
            );
            return Err(ServiceError::Forbidden(
                "Only the current owner can transfer ownership".into(),
            ));
        }
        // The policy passed, so the requester's active owner row exists.
        let requester_row = requester_row
            .ok_or_else(|| ServiceError::Internal("Owner row disappeared".into()))?;

        let new_owner_user = self
            .users
            .find_by_username(new_owner_username)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
        if new_owner_user.id == requester.id {
            return Err(ServiceError::Conflict(
                "You already own this bingo".into(),
            ));
        }
        let new_owner = self
            .participants
            .find_active(bingo_id, new_owner_user.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Participant not found".into()))?;

        self.participants
            .transfer_ownership(requester_row.id, new_owner.id)
            .await?;

        info!(
            old_owner = %requester.username,
            new_owner = %new_owner_username,
            %bingo_id,
            "Ownership transferred"
        );
        self.activity.record(ActivityEvent::ownership_transferred(
            bingo_id,
            requester.id,
            new_owner_user.id,
        ));

        Ok(())
    }
}
