use std::sync::Arc;

use chrono::Duration as ChronoDuration;
use tokio::time::{interval, Duration};

use crate::constants::{SUBMISSION_RETENTION_HOURS, SWEEP_INTERVAL_SECS};
use crate::repositories::submission::SubmissionStore;

/// Hourly sweep removing submissions past the retention window.
pub async fn start_sweep_task(store: Arc<dyn SubmissionStore>) {
    let mut interval = interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
    let max_age = ChronoDuration::hours(SUBMISSION_RETENTION_HOURS);

    loop {
        interval.tick().await;

        match store.sweep_expired(max_age).await {
            Ok(0) => {}
            Ok(count) => tracing::info!("Swept {} expired submissions", count),
            Err(e) => tracing::error!("Submission sweep failed: {}", e),
        }
    }
}
