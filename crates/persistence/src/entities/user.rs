//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{SiteRole, User};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for site_role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "site_role", rename_all = "lowercase")]
pub enum SiteRoleDb {
    User,
    Moderator,
    Admin,
}

impl From<SiteRoleDb> for SiteRole {
    fn from(db: SiteRoleDb) -> Self {
        match db {
            SiteRoleDb::User => Self::User,
            SiteRoleDb::Moderator => Self::Moderator,
            SiteRoleDb::Admin => Self::Admin,
        }
    }
}

impl From<SiteRole> for SiteRoleDb {
    fn from(role: SiteRole) -> Self {
        match role {
            SiteRole::User => Self::User,
            SiteRole::Moderator => Self::Moderator,
            SiteRole::Admin => Self::Admin,
        }
    }
}

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub username: String,
    pub username_normalized: String,
    pub role: SiteRoleDb,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            username_normalized: entity.username_normalized,
            role: entity.role.into(),
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_conversion_round_trip() {
        for role in [SiteRole::User, SiteRole::Moderator, SiteRole::Admin] {
            assert_eq!(SiteRole::from(SiteRoleDb::from(role)), role);
        }
    }

    #[test]
    fn test_entity_to_domain() {
        let entity = UserEntity {
            id: Uuid::new_v4(),
            username: "Alice".to_string(),
            username_normalized: "alice".to_string(),
            role: SiteRoleDb::Moderator,
            created_at: Utc::now(),
        };

        let user: User = entity.into();
        assert!(user.is_moderator());
        assert_eq!(user.username_normalized, "alice");
    }
}
