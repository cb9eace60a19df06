use async_trait::async_trait;
use derive_more::Display;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{authentication::Credentials, PoolConfig},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tokio::time::timeout;
use zeroize::Zeroizing;

use crate::constants::{MAIL_POOL_MAX_SIZE, MAIL_SEND_TIMEOUT_SECS};
use crate::settings::EmailConfig;

#[derive(Debug, Display)]
pub enum MailError {
    #[display("Mail transport is not configured: {_0}")]
    Configuration(String),

    #[display("Failed to send email: {_0}")]
    Send(String),

    #[display("Email send timed out after {_0}s")]
    Timeout(u64),
}

/// Outbound mail seam. `SmtpMailer` is the production implementation; tests
/// substitute recording or failing doubles.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError>;
}

#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    send_timeout: Duration,
}

impl SmtpMailer {
    /// Builds the pooled transport. Fails fast when credentials are absent so
    /// a misconfigured deployment dies at startup, not on the first submission.
    pub fn from_config(config: &EmailConfig) -> Result<Self, MailError> {
        if config.user.trim().is_empty() || config.pass.is_empty() {
            return Err(MailError::Configuration(
                "EMAIL_USER and EMAIL_PASS must be set".into(),
            ));
        }

        let password = Zeroizing::new(config.pass.clone());
        let credentials = Credentials::new(config.user.clone(), password.to_string());

        let host = config.resolved_host();
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| MailError::Configuration(format!("Invalid SMTP relay {}: {}", host, e)))?;

        let transport = builder
            .port(config.port)
            .credentials(credentials)
            .pool_config(PoolConfig::new().max_size(MAIL_POOL_MAX_SIZE))
            .build();

        let from = format!("{} <{}>", config.from_name, config.user)
            .parse()
            .map_err(|e| {
                MailError::Configuration(format!("Invalid from address {}: {}", config.user, e))
            })?;

        Ok(SmtpMailer {
            transport,
            from,
            send_timeout: Duration::from_secs(MAIL_SEND_TIMEOUT_SECS),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|e| MailError::Send(format!("Invalid recipient {}: {}", to, e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| MailError::Send(format!("Error building message: {}", e)))?;

        match timeout(self.send_timeout, self.transport.send(message)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(MailError::Send(e.to_string())),
            Err(_) => Err(MailError::Timeout(self.send_timeout.as_secs())),
        }
    }
}
