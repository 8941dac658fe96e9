//! Authorization policies for participation changes.
//!
//! Each policy is a pure predicate over an explicit [`Actor`] capability
//! value; callers load the relevant rows, build the actor, and translate a
//! `false` into a typed denial at the boundary. No policy here performs I/O
//! or logging.

use crate::models::participant::Participant;
use crate::models::role::ParticipantRole;
use crate::models::session::Session;
use crate::models::user::User;
use uuid::Uuid;

/// The requester's capabilities relevant to one bingo.
///
/// `is_moderator` is the globally elevated permission; `role` is the
/// requester's role in the bingo at hand, `None` when they are not an
/// active participant of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub is_moderator: bool,
    pub role: Option<ParticipantRole>,
}

impl Actor {
    /// Builds the capability value from the requesting user and their
    /// participant row in the target bingo, if any.
    pub fn for_user(user: &User, participant: Option<&Participant>) -> Self {
        Self {
            user_id: user.id,
            is_moderator: user.is_moderator(),
            role: participant.filter(|p| p.is_active()).map(|p| p.role),
        }
    }

    /// Threshold check against the actor's bingo-local role. A requester
    /// with no role in the bingo never meets any threshold.
    pub fn has_at_least(&self, required: ParticipantRole) -> bool {
        self.role.is_some_and(|role| role.has_at_least(required))
    }

    /// Whether `target` strictly outranks this actor in the bingo. A
    /// requester with no role is outranked by everyone.
    fn outranked_by(&self, target: ParticipantRole) -> bool {
        match self.role {
            Some(role) => target.is_higher_than(role),
            None => true,
        }
    }
}

/// Whether the actor may update the target participant.
///
/// A role change requires owner rank (or the global permission). Otherwise
/// organizers and owners manage peers-or-below, anyone may update
/// themselves, and nobody below organizer may touch someone strictly senior
/// to them.
pub fn can_update_participant(
    actor: &Actor,
    target: &Participant,
    role_change_requested: bool,
) -> bool {
    if role_change_requested && !actor.is_moderator && !actor.has_at_least(ParticipantRole::Owner) {
        return false;
    }
    if !actor.is_moderator
        && !actor.has_at_least(ParticipantRole::Organizer)
        && target.user_id != actor.user_id
        && actor.outranked_by(target.role)
    {
        return false;
    }
    true
}

/// Whether the actor may remove the target participant. Self-leave is
/// always permitted; otherwise organizer rank or the global permission is
/// required.
pub fn can_remove_participant(actor: &Actor, target: &Participant) -> bool {
    actor.is_moderator
        || actor.has_at_least(ParticipantRole::Organizer)
        || target.user_id == actor.user_id
}

/// Whether the actor may point the session at a bingo. Only the session's
/// owner, or the global permission.
pub fn can_set_current_bingo(actor: &Actor, session: &Session) -> bool {
    actor.is_moderator || session.user_id == actor.user_id
}

/// Whether the actor may transfer ownership of the bingo. Strictly the
/// current owner; the global permission does not bypass this one.
pub fn can_transfer_ownership(actor: &Actor) -> bool {
    actor.role == Some(ParticipantRole::Owner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::participant::MembershipState;
    use chrono::Utc;

    fn actor(role: Option<ParticipantRole>) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            is_moderator: false,
            role,
        }
    }

    fn moderator() -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            is_moderator: true,
            role: None,
        }
    }

    fn target(role: ParticipantRole) -> Participant {
        Participant {
            id: Uuid::new_v4(),
            bingo_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role,
            team_id: None,
            points: 0,
            membership: MembershipState::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: None,
        }
    }

    fn session_for(user_id: Uuid) -> Session {
        Session {
            uuid: Uuid::new_v4(),
            user_id,
            current_bingo_id: None,
            signed_out_at: None,
            created_at: Utc::now(),
            last_seen_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_change_requires_owner() {
        for role in [None, Some(ParticipantRole::Participant), Some(ParticipantRole::Organizer)] {
            assert!(!can_update_participant(
                &actor(role),
                &target(ParticipantRole::Participant),
                true
            ));
        }
        assert!(can_update_participant(
            &actor(Some(ParticipantRole::Owner)),
            &target(ParticipantRole::Participant),
            true
        ));
        assert!(can_update_participant(
            &moderator(),
            &target(ParticipantRole::Participant),
            true
        ));
    }

    #[test]
    fn test_organizer_updates_peer_without_role_change() {
        let organizer = actor(Some(ParticipantRole::Organizer));
        assert!(can_update_participant(
            &organizer,
            &target(ParticipantRole::Participant),
            false
        ));
        assert!(can_update_participant(
            &organizer,
            &target(ParticipantRole::Organizer),
            false
        ));
        // The threshold clause admits the organizer even against the owner;
        // role changes are still barred by the owner clause.
        assert!(can_update_participant(
            &organizer,
            &target(ParticipantRole::Owner),
            false
        ));
    }

    #[test]
    fn test_self_update_without_role_change_allowed_at_any_rank() {
        let requester = actor(Some(ParticipantRole::Participant));
        let mut own_row = target(ParticipantRole::Participant);
        own_row.user_id = requester.user_id;
        assert!(can_update_participant(&requester, &own_row, false));
    }

    #[test]
    fn test_junior_cannot_touch_senior() {
        let requester = actor(Some(ParticipantRole::Participant));
        assert!(!can_update_participant(
            &requester,
            &target(ParticipantRole::Organizer),
            false
        ));
        assert!(!can_update_participant(
            &requester,
            &target(ParticipantRole::Owner),
            false
        ));
        // Peers are not strictly senior, so the seniority clause passes.
        assert!(can_update_participant(
            &requester,
            &target(ParticipantRole::Participant),
            false
        ));
    }

    #[test]
    fn test_non_participant_requester() {
        let outsider = actor(None);
        assert!(!can_update_participant(
            &outsider,
            &target(ParticipantRole::Participant),
            false
        ));
        assert!(can_update_participant(
            &moderator(),
            &target(ParticipantRole::Owner),
            false
        ));
    }

    #[test]
    fn test_remove_requires_organizer_or_self() {
        assert!(!can_remove_participant(
            &actor(Some(ParticipantRole::Participant)),
            &target(ParticipantRole::Participant)
        ));
        assert!(can_remove_participant(
            &actor(Some(ParticipantRole::Organizer)),
            &target(ParticipantRole::Participant)
        ));
        assert!(can_remove_participant(
            &actor(Some(ParticipantRole::Owner)),
            &target(ParticipantRole::Organizer)
        ));
        assert!(can_remove_participant(
            &moderator(),
            &target(ParticipantRole::Owner)
        ));
    }

    #[test]
    fn test_self_leave_always_permitted() {
        for role in [
            ParticipantRole::Participant,
            ParticipantRole::Organizer,
            ParticipantRole::Owner,
        ] {
            let requester = actor(Some(role));
            let mut own_row = target(role);
            own_row.user_id = requester.user_id;
            assert!(can_remove_participant(&requester, &own_row));
        }
    }

    #[test]
    fn test_set_current_bingo_owner_or_moderator() {
        let requester = actor(None);
        assert!(can_set_current_bingo(
            &requester,
            &session_for(requester.user_id)
        ));
        assert!(!can_set_current_bingo(
            &requester,
            &session_for(Uuid::new_v4())
        ));
        assert!(can_set_current_bingo(
            &moderator(),
            &session_for(Uuid::new_v4())
        ));
    }

    #[test]
    fn test_transfer_ownership_owner_only() {
        assert!(can_transfer_ownership(&actor(Some(ParticipantRole::Owner))));
        assert!(!can_transfer_ownership(&actor(Some(
            ParticipantRole::Organizer
        ))));
        assert!(!can_transfer_ownership(&actor(Some(
            ParticipantRole::Participant
        ))));
        assert!(!can_transfer_ownership(&actor(None)));
        // The global permission gates other policies, not this one.
        assert!(!can_transfer_ownership(&moderator()));
    }

    #[test]
    fn test_actor_for_user_ignores_removed_row() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            username_normalized: "alice".to_string(),
            role: crate::models::user::SiteRole::User,
            created_at: Utc::now(),
        };
        let mut row = target(ParticipantRole::Organizer);
        row.user_id = user.id;
        row.membership = MembershipState::Removed {
            at: Utc::now(),
            by: None,
        };

        let built = Actor::for_user(&user, Some(&row));
        assert_eq!(built.role, None);
        assert!(!built.is_moderator);
    }
}
