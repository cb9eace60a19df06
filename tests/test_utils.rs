use std::net::TcpListener;
use std::sync::Arc;

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;

use formdesk_backend::{
    mail::transport::{MailError, Mailer},
    repositories::{memory::MemorySubmissionStore, submission::SubmissionStore},
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment, EmailConfig},
    AppState,
};

pub struct TestApp {
    pub address: String,
    pub client: Client,
}

impl TestApp {
    pub async fn spawn(mailer: Arc<dyn Mailer>) -> Self {
        let config = test_config();

        let store: Arc<dyn SubmissionStore> = Arc::new(MemorySubmissionStore::new());
        let state = web::Data::new(AppState::new(&config, store, mailer));

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test listener");
        let port = listener.local_addr().expect("listener address").port();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .workers(1)
        .listen(listener)
        .expect("Failed to listen on test port")
        .run();

        actix_web::rt::spawn(server);

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            client: Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Formdesk-Test".into(),
        port: 0,
        host: "127.0.0.1".into(),
        worker_count: 1,
        cors_allowed_origins: vec!["*".into()],
        trust_x_forwarded_for: true,
        email: EmailConfig {
            user: "mailer@example.com".into(),
            pass: "test-password".into(),
            host: "smtp.example.com".into(),
            admin_email: "admin@example.com".into(),
            ..EmailConfig::default()
        },
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Accepts every send and records it for assertions.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn sent_to(&self, to: &str) -> Vec<SentMail> {
        self.sent
            .lock()
            .iter()
            .filter(|m| m.to == to)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        self.sent.lock().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html_body.to_string(),
        });
        Ok(())
    }
}

/// Refuses every send, as if the transport were unreachable.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _to: &str, _subject: &str, _html_body: &str) -> Result<(), MailError> {
        Err(MailError::Send("connection refused".into()))
    }
}

pub fn valid_contact_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "+1 (555) 123-4567",
        "category": "General",
        "age": "34",
        "message": "Hello there"
    })
}

pub fn valid_signup_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "5551234567"
    })
}
