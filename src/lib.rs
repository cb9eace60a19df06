use std::sync::Arc;
use std::time::Duration;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{limiter, mail, utils};

use constants::{LIMITER_IDLE_TTL_SECS, RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECS};
use limiter::rate_limiter::RateLimiterStore;
use mail::transport::Mailer;
use repositories::submission::SubmissionStore;
use use_cases::submit::{DispatchPolicy, SubmissionService};

pub struct AppState {
    pub submissions: SubmissionService,
    pub limiter: RateLimiterStore,
    pub trust_x_forwarded_for: bool,
}

impl AppState {
    pub fn new(
        config: &settings::AppConfig,
        store: Arc<dyn SubmissionStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let policy = DispatchPolicy {
            admin_email: config.email.admin_email.clone(),
            user_subject: config.email.user_subject.clone(),
            is_production: config.is_production(),
        };

        AppState {
            submissions: SubmissionService::new(store, mailer, policy),
            limiter: RateLimiterStore::new(
                RATE_LIMIT_MAX_REQUESTS,
                Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
                Duration::from_secs(LIMITER_IDLE_TTL_SECS),
            ),
            trust_x_forwarded_for: config.trust_x_forwarded_for,
        }
    }
}
