//! User repository for database operations.
//!
//! Users are owned by the identity layer; this core only resolves them.

use domain::models::User;
use shared::validation::normalize_name;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::user::UserEntity;

/// Repository for user lookups.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let entity = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, username_normalized, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find a user by username, case-insensitively.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let entity = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, username_normalized, role, created_at
            FROM users
            WHERE username_normalized = $1
            "#,
        )
        .bind(normalize_name(username))
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }
}
