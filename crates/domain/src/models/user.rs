//! User domain model.
//!
//! Users are managed by the identity layer; this core consumes the username
//! and the site-wide role that carries the globally elevated permission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Site-wide role of a user account, independent of any bingo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteRole {
    User,
    Moderator,
    Admin,
}

impl SiteRole {
    /// The globally elevated permission: bypasses bingo-local seniority
    /// checks in the authorization policies.
    pub fn is_moderator(&self) -> bool {
        matches!(self, SiteRole::Moderator | SiteRole::Admin)
    }
}

impl FromStr for SiteRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(SiteRole::User),
            "moderator" => Ok(SiteRole::Moderator),
            "admin" => Ok(SiteRole::Admin),
            _ => Err(format!("Unknown site role: {}", s)),
        }
    }
}

impl std::fmt::Display for SiteRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteRole::User => write!(f, "user"),
            SiteRole::Moderator => write!(f, "moderator"),
            SiteRole::Admin => write!(f, "admin"),
        }
    }
}

/// User domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Lowercased username used for lookups.
    pub username_normalized: String,
    pub role: SiteRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_moderator(&self) -> bool {
        self.role.is_moderator()
    }
}
