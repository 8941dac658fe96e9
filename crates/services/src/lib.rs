//! Lifecycle services for Bingo Hub backend.
//!
//! This crate is the surface the request-handling boundary calls into:
//! - `ParticipantService` — membership, role/team changes, ownership transfer
//! - `InvitationService` — invitation codes from creation to settlement
//! - `SessionService` — the session's current-bingo binding
//! - `ActivityRecorder` — fire-and-forget activity log emission
//! - Typed `ServiceError` taxonomy, runtime `Config`, logging setup

pub mod activity;
pub mod config;
pub mod error;
pub mod invitations;
pub mod participants;
pub mod session;
pub mod telemetry;

pub use activity::ActivityRecorder;
pub use config::Config;
pub use error::ServiceError;
pub use invitations::InvitationService;
pub use participants::ParticipantService;
pub use session::SessionService;
