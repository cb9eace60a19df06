use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{
    entities::submission::{Submission, SubmissionInsert, SubmissionKind, SubmissionStatus},
    errors::AppError,
    repositories::submission::SubmissionStore,
};

/// Insertion-ordered in-memory store. Everything is volatile and lost on
/// restart. Status updates replace the whole record so readers never observe
/// a half-written entry.
#[derive(Default)]
pub struct MemorySubmissionStore {
    records: RwLock<Vec<Submission>>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn insert(&self, new: SubmissionInsert) -> Result<Submission, AppError> {
        let record = Submission {
            id: Uuid::new_v4(),
            kind: new.kind,
            name: new.name,
            email: new.email,
            phone: new.phone,
            category: new.category,
            message: new.message,
            age: new.age,
            source: new.source,
            date: Utc::now(),
            status: SubmissionStatus::Pending,
            ip: new.ip,
            error: None,
        };

        self.records.write().push(record.clone());
        Ok(record)
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: SubmissionStatus,
        error: Option<String>,
    ) -> Result<(), AppError> {
        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or_else(|| AppError::NotFound("Submission not found".into()))?;

        if record.status != SubmissionStatus::Pending {
            return Ok(());
        }

        let mut updated = record.clone();
        updated.status = status;
        updated.error = error;
        *record = updated;
        Ok(())
    }

    async fn list(&self, kind: SubmissionKind) -> Result<Vec<Submission>, AppError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect())
    }

    async fn count(&self, kind: SubmissionKind) -> Result<usize, AppError> {
        Ok(self.records.read().iter().filter(|r| r.kind == kind).count())
    }

    async fn sweep_expired(&self, max_age: Duration) -> Result<usize, AppError> {
        let cutoff = Utc::now() - max_age;
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.date >= cutoff);
        Ok(before - records.len())
    }
}
