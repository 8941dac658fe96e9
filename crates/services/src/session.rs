//! Session current-bingo binding service.
//!
//! Keeps a session's "current bingo" pointer consistent with actual
//! participation: validated when set, re-validated on every read. A stale
//! pointer is reported as "no current bingo" without mutating the session;
//! the next explicit set overwrites it.

use domain::models::{Bingo, Session, User};
use domain::services::authorization::{can_set_current_bingo, Actor};
use persistence::repositories::{BingoRepository, ParticipantRepository, SessionRepository};
use sqlx::PgPool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ServiceError;

/// Service for the session-to-bingo binding.
#[derive(Clone)]
pub struct SessionService {
    sessions: SessionRepository,
    participants: ParticipantRepository,
    bingos: BingoRepository,
}

impl SessionService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            sessions: SessionRepository::new(pool.clone()),
            participants: ParticipantRepository::new(pool.clone()),
            bingos: BingoRepository::new(pool),
        }
    }

    /// Points the session at a bingo the session's user participates in.
    ///
    /// "Bingo does not exist" and "bingo exists but the user is not in it"
    /// are deliberately the same NotFound to the caller, so a session
    /// cannot be used to probe for private bingos; the log line keeps the
    /// two causes apart.
    pub async fn set_current_bingo(
        &self,
        requester: &User,
        session_uuid: Uuid,
        bingo_id: Uuid,
    ) -> Result<Session, ServiceError> {
        let session = self
            .sessions
            .find_by_uuid(session_uuid)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Session not found".into()))?;
        if session.is_signed_out() {
            return Err(ServiceError::Forbidden("Session is signed out".into()));
        }

        let actor = Actor {
            user_id: requester.id,
            is_moderator: requester.is_moderator(),
            role: None,
        };
        if !can_set_current_bingo(&actor, &session) {
            warn!(
                requester = %requester.username,
                session = %session_uuid,
                "Current-bingo change denied"
            );
            return Err(ServiceError::Forbidden(
                "You are not allowed to modify this session".into(),
            ));
        }

        if !self
            .participants
            .exists_active(bingo_id, session.user_id)
            .await?
        {
            let bingo_exists = self.bingos.find_by_id(bingo_id).await?.is_some();
            warn!(
                session = %session_uuid,
                %bingo_id,
                bingo_exists,
                "Rejecting current-bingo set: user is not a participant"
            );
            return Err(ServiceError::NotFound("Bingo not found".into()));
        }

        let updated = self
            .sessions
            .set_current_bingo(session.uuid, Some(bingo_id))
            .await?
            .ok_or_else(|| ServiceError::Forbidden("Session is signed out".into()))?;

        info!(session = %session_uuid, %bingo_id, "Current bingo set");
        Ok(updated)
    }

    /// Clears the session's current-bingo pointer.
    pub async fn clear_current_bingo(
        &self,
        requester: &User,
        session_uuid: Uuid,
    ) -> Result<Session, ServiceError> {
        let session = self
            .sessions
            .find_by_uuid(session_uuid)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Session not found".into()))?;
        if session.is_signed_out() {
            return Err(ServiceError::Forbidden("Session is signed out".into()));
        }

        let actor = Actor {
            user_id: requester.id,
            is_moderator: requester.is_moderator(),
            role: None,
        };
        if !can_set_current_bingo(&actor, &session) {
            return Err(ServiceError::Forbidden(
                "You are not allowed to modify this session".into(),
            ));
        }

        let updated = self
            .sessions
            .set_current_bingo(session.uuid, None)
            .await?
            .ok_or_else(|| ServiceError::Forbidden("Session is signed out".into()))?;

        info!(session = %session_uuid, "Current bingo cleared");
        Ok(updated)
    }

    /// Resolves the session's current bingo for request context.
    ///
    /// Returns None when the pointer is unset or stale (the user is no
    /// longer a participant). Staleness is detected lazily; the read never
    /// writes, and the stored pointer stays as-is until the next explicit
    /// set.
    pub async fn resolve_current_bingo(
        &self,
        session: &Session,
    ) -> Result<Option<Bingo>, ServiceError> {
        let Some(bingo_id) = session.current_bingo_id else {
            return Ok(None);
        };

        if !self
            .participants
            .exists_active(bingo_id, session.user_id)
            .await?
        {
            debug!(
                session = %session.uuid,
                %bingo_id,
                "Current-bingo pointer is stale; treating as unset"
            );
            return Ok(None);
        }

        Ok(self.bingos.find_by_id(bingo_id).await?)
    }
}
