use std::sync::Arc;

use futures_util::future::join;
use validator::Validate;

use crate::{
    entities::forms::{ContactForm, SignupForm, SubdomainContactForm},
    entities::submission::{
        Submission, SubmissionInsert, SubmissionKind, SubmissionList, SubmissionStatus,
        SubmissionSummary, SubmitAccepted,
    },
    errors::AppError,
    infrastructure::mail::templates,
    infrastructure::mail::transport::{MailError, Mailer},
    repositories::submission::SubmissionStore,
};

/// Per-deployment dispatch settings: where admin notifications go, the
/// confirmation subject override, and whether raw error detail may reach
/// the client.
#[derive(Debug, Clone)]
pub struct DispatchPolicy {
    pub admin_email: String,
    pub user_subject: Option<String>,
    pub is_production: bool,
}

impl DispatchPolicy {
    fn confirmation_subject(&self, kind: SubmissionKind) -> String {
        match (&self.user_subject, kind) {
            (Some(subject), SubmissionKind::Contact | SubmissionKind::SubdomainContact) => {
                subject.clone()
            }
            _ => kind.default_confirmation_subject().to_string(),
        }
    }

    fn client_message(&self, detail: String, generic: &str) -> String {
        if self.is_production {
            generic.to_string()
        } else {
            detail
        }
    }
}

pub struct SubmissionService {
    store: Arc<dyn SubmissionStore>,
    mailer: Arc<dyn Mailer>,
    policy: DispatchPolicy,
}

impl SubmissionService {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        mailer: Arc<dyn Mailer>,
        policy: DispatchPolicy,
    ) -> Self {
        SubmissionService {
            store,
            mailer,
            policy,
        }
    }

    pub async fn submit_contact(
        &self,
        form: ContactForm,
        ip: Option<String>,
    ) -> Result<SubmitAccepted, AppError> {
        form.validate()?;
        self.submit(form.into_insert(ip)).await
    }

    pub async fn submit_subdomain_contact(
        &self,
        form: SubdomainContactForm,
        ip: Option<String>,
    ) -> Result<SubmitAccepted, AppError> {
        form.validate()?;
        self.submit(form.into_insert(ip)).await
    }

    pub async fn submit_signup(
        &self,
        form: SignupForm,
        ip: Option<String>,
    ) -> Result<SubmitAccepted, AppError> {
        form.validate()?;
        self.submit(form.into_insert(ip)).await
    }

    pub async fn list(&self, kind: SubmissionKind) -> Result<SubmissionList, AppError> {
        let data = self.store.list(kind).await?;
        Ok(SubmissionList {
            success: true,
            count: data.len(),
            data,
        })
    }

    pub async fn count(&self, kind: SubmissionKind) -> Result<usize, AppError> {
        self.store.count(kind).await
    }

    /// Persist, render, dispatch both emails concurrently, then resolve the
    /// record's status. The admin notification decides the overall outcome;
    /// a failed user confirmation is logged and tolerated.
    async fn submit(&self, insert: SubmissionInsert) -> Result<SubmitAccepted, AppError> {
        let record = self.store.insert(insert).await?;

        let admin_html = templates::render_admin_notification(&record);
        let user_html = templates::render_user_confirmation(&record);
        let admin_subject = record.kind.admin_subject(&record.name);
        let user_subject = self.policy.confirmation_subject(record.kind);

        let (admin_sent, user_sent) = join(
            self.mailer
                .send(&self.policy.admin_email, &admin_subject, &admin_html),
            self.mailer.send(&record.email, &user_subject, &user_html),
        )
        .await;

        if let Err(err) = user_sent {
            tracing::warn!(id = %record.id, "Confirmation email failed: {}", err);
        }

        match admin_sent {
            Ok(()) => {
                self.store
                    .update_status(&record.id, SubmissionStatus::Completed, None)
                    .await?;
                Ok(accepted(&record))
            }
            Err(err) => {
                tracing::error!(id = %record.id, "Admin notification failed: {}", err);
                self.store
                    .update_status(&record.id, SubmissionStatus::Failed, Some(err.to_string()))
                    .await?;
                Err(self.dispatch_error(err))
            }
        }
    }

    fn dispatch_error(&self, err: MailError) -> AppError {
        match err {
            MailError::Configuration(detail) => AppError::MailConfiguration(
                self.policy
                    .client_message(detail, "Email service is not configured."),
            ),
            other => AppError::Dispatch(self.policy.client_message(
                other.to_string(),
                "Failed to send your message. Please try again later.",
            )),
        }
    }
}

fn accepted(record: &Submission) -> SubmitAccepted {
    SubmitAccepted {
        success: true,
        message: record.kind.accepted_message().to_string(),
        data: SubmissionSummary::from(record),
    }
}
