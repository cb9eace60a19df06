use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dispatch lifecycle of a stored submission. Transitions only move forward:
/// `Pending` is set at insert and resolves once to `Completed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Completed,
    Failed,
}

/// Which form produced a submission. Listing endpoints filter on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Contact,
    SubdomainContact,
    Signup,
}

impl SubmissionKind {
    pub fn admin_subject(&self, name: &str) -> String {
        match self {
            SubmissionKind::Contact => format!("New contact form submission from {}", name),
            SubmissionKind::SubdomainContact => format!("New inquiry from {}", name),
            SubmissionKind::Signup => format!("New signup: {}", name),
        }
    }

    pub fn default_confirmation_subject(&self) -> &'static str {
        match self {
            SubmissionKind::Contact | SubmissionKind::SubdomainContact => {
                "Thanks for reaching out!"
            }
            SubmissionKind::Signup => "Welcome aboard!",
        }
    }

    pub fn accepted_message(&self) -> &'static str {
        match self {
            SubmissionKind::Contact | SubmissionKind::SubdomainContact => {
                "Your message has been received."
            }
            SubmissionKind::Signup => "Your signup has been received.",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub kind: SubmissionKind,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub date: DateTime<Utc>,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A validated, sanitized submission ready for the store. The store assigns
/// id, timestamp, and initial status.
#[derive(Debug, Clone)]
pub struct SubmissionInsert {
    pub kind: SubmissionKind,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub message: Option<String>,
    pub age: Option<String>,
    pub source: Option<String>,
    pub ip: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&Submission> for SubmissionSummary {
    fn from(submission: &Submission) -> Self {
        SubmissionSummary {
            id: submission.id,
            name: submission.name.clone(),
            email: submission.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitAccepted {
    pub success: bool,
    pub message: String,
    pub data: SubmissionSummary,
}

#[derive(Debug, Serialize)]
pub struct SubmissionList {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Submission>,
}
