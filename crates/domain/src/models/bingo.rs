//! Bingo domain model.
//!
//! The bingo aggregate itself is managed elsewhere; this core only consumes
//! its status and registration window when gating participation changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle status of a bingo event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BingoStatus {
    Pending,
    Ongoing,
    Ended,
    Canceled,
}

impl FromStr for BingoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BingoStatus::Pending),
            "ongoing" => Ok(BingoStatus::Ongoing),
            "ended" => Ok(BingoStatus::Ended),
            "canceled" => Ok(BingoStatus::Canceled),
            _ => Err(format!("Unknown bingo status: {}", s)),
        }
    }
}

impl std::fmt::Display for BingoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BingoStatus::Pending => write!(f, "pending"),
            BingoStatus::Ongoing => write!(f, "ongoing"),
            BingoStatus::Ended => write!(f, "ended"),
            BingoStatus::Canceled => write!(f, "canceled"),
        }
    }
}

/// Bingo domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Bingo {
    pub id: Uuid,
    pub title: String,
    pub status: BingoStatus,
    pub private: bool,
    /// Last moment at which new participants may register, if bounded.
    pub max_registration_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bingo {
    /// Participant role/team edits are only valid before the bingo starts.
    pub fn is_pending(&self) -> bool {
        self.status == BingoStatus::Pending
    }

    /// Whether the bingo accepts new participants at `now`.
    ///
    /// Registration stays open through the pending and ongoing phases,
    /// bounded by the registration deadline when one is set.
    pub fn accepts_registrations(&self, now: DateTime<Utc>) -> bool {
        if !matches!(self.status, BingoStatus::Pending | BingoStatus::Ongoing) {
            return false;
        }
        self.max_registration_date.map_or(true, |limit| now <= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn bingo(status: BingoStatus, max_registration_date: Option<DateTime<Utc>>) -> Bingo {
        Bingo {
            id: Uuid::new_v4(),
            title: "Spring Bingo".to_string(),
            status,
            private: false,
            max_registration_date,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_pending() {
        assert!(bingo(BingoStatus::Pending, None).is_pending());
        assert!(!bingo(BingoStatus::Ongoing, None).is_pending());
    }

    #[test]
    fn test_accepts_registrations_by_status() {
        let now = Utc::now();
        assert!(bingo(BingoStatus::Pending, None).accepts_registrations(now));
        assert!(bingo(BingoStatus::Ongoing, None).accepts_registrations(now));
        assert!(!bingo(BingoStatus::Ended, None).accepts_registrations(now));
        assert!(!bingo(BingoStatus::Canceled, None).accepts_registrations(now));
    }

    #[test]
    fn test_accepts_registrations_deadline() {
        let now = Utc::now();
        let open = bingo(BingoStatus::Ongoing, Some(now + Duration::hours(1)));
        let closed = bingo(BingoStatus::Ongoing, Some(now - Duration::hours(1)));
        assert!(open.accepts_registrations(now));
        assert!(!closed.accepts_registrations(now));
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(BingoStatus::from_str("Pending").unwrap(), BingoStatus::Pending);
        assert_eq!(BingoStatus::from_str("ongoing").unwrap(), BingoStatus::Ongoing);
        assert!(BingoStatus::from_str("archived").is_err());
    }
}
