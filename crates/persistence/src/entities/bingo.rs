//! Bingo entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Bingo, BingoStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for bingo_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "bingo_status", rename_all = "lowercase")]
pub enum BingoStatusDb {
    Pending,
    Ongoing,
    Ended,
    Canceled,
}

impl From<BingoStatusDb> for BingoStatus {
    fn from(db: BingoStatusDb) -> Self {
        match db {
            BingoStatusDb::Pending => Self::Pending,
            BingoStatusDb::Ongoing => Self::Ongoing,
            BingoStatusDb::Ended => Self::Ended,
            BingoStatusDb::Canceled => Self::Canceled,
        }
    }
}

impl From<BingoStatus> for BingoStatusDb {
    fn from(status: BingoStatus) -> Self {
        match status {
            BingoStatus::Pending => Self::Pending,
            BingoStatus::Ongoing => Self::Ongoing,
            BingoStatus::Ended => Self::Ended,
            BingoStatus::Canceled => Self::Canceled,
        }
    }
}

/// Database row mapping for the bingos table.
#[derive(Debug, Clone, FromRow)]
pub struct BingoEntity {
    pub id: Uuid,
    pub title: String,
    pub status: BingoStatusDb,
    pub private: bool,
    pub max_registration_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BingoEntity> for Bingo {
    fn from(entity: BingoEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            status: entity.status.into(),
            private: entity.private,
            max_registration_date: entity.max_registration_date,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
