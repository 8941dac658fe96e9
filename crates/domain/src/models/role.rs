//! Participant role hierarchy.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Roles a user can hold within a single bingo.
///
/// Roles are totally ordered: `Participant < Organizer < Owner`. The order is
/// carried by an explicit integer rank, never by declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Participant,
    Organizer,
    Owner,
}

impl ParticipantRole {
    /// Numeric rank of this role. Higher rank means more senior.
    pub fn rank(&self) -> u8 {
        match self {
            ParticipantRole::Participant => 0,
            ParticipantRole::Organizer => 1,
            ParticipantRole::Owner => 2,
        }
    }

    /// Non-strict threshold check: this role is at least as senior as
    /// `required`. Every role satisfies itself.
    pub fn has_at_least(&self, required: ParticipantRole) -> bool {
        self.rank() >= required.rank()
    }

    /// Strict seniority check: this role outranks `other`. A role never
    /// outranks itself; peers manage each other only through the
    /// organizer-threshold clause of the policies, not through this one.
    pub fn is_higher_than(&self, other: ParticipantRole) -> bool {
        self.rank() > other.rank()
    }
}

impl FromStr for ParticipantRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "participant" => Ok(ParticipantRole::Participant),
            "organizer" => Ok(ParticipantRole::Organizer),
            "owner" => Ok(ParticipantRole::Owner),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

impl std::fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParticipantRole::Participant => write!(f, "participant"),
            ParticipantRole::Organizer => write!(f, "organizer"),
            ParticipantRole::Owner => write!(f, "owner"),
        }
    }
}
