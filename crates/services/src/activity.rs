//! Fire-and-forget activity log emission.

use domain::models::ActivityEvent;
use persistence::repositories::ActivityLogRepository;
use sqlx::PgPool;
use tracing::warn;

/// Records activity facts without blocking or failing the operation that
/// produced them.
#[derive(Clone)]
pub struct ActivityRecorder {
    repository: ActivityLogRepository,
}

impl ActivityRecorder {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ActivityLogRepository::new(pool),
        }
    }

    /// Emits one fact on a detached task. A failed insert is logged and
    /// dropped; it must never roll back the state transition it describes.
    pub fn record(&self, event: ActivityEvent) {
        let repository = self.repository.clone();
        tokio::spawn(async move {
            if let Err(err) = repository.insert(&event).await {
                warn!(
                    kind = %event.kind,
                    bingo_id = %event.bingo_id,
                    error = %err,
                    "Failed to record activity event"
                );
            }
        });
    }
}
