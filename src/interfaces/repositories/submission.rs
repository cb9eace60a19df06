use async_trait::async_trait;
use chrono::Duration;
use uuid::Uuid;

use crate::{
    entities::submission::{Submission, SubmissionInsert, SubmissionKind, SubmissionStatus},
    errors::AppError,
};

/// Storage seam for accepted submissions. The process-memory implementation
/// is the only one today; a durable store can slot in behind the same trait.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Assigns id, timestamp, and `Pending` status, and returns the stored record.
    async fn insert(&self, new: SubmissionInsert) -> Result<Submission, AppError>;

    /// Resolves a pending record to `Completed` or `Failed`. Transitions are
    /// forward-only; resolving an already-resolved record is a no-op.
    async fn update_status(
        &self,
        id: &Uuid,
        status: SubmissionStatus,
        error: Option<String>,
    ) -> Result<(), AppError>;

    /// All records of one kind, in insertion order.
    async fn list(&self, kind: SubmissionKind) -> Result<Vec<Submission>, AppError>;

    async fn count(&self, kind: SubmissionKind) -> Result<usize, AppError>;

    /// Removes records older than `max_age`; returns how many were removed.
    async fn sweep_expired(&self, max_age: Duration) -> Result<usize, AppError>;
}
