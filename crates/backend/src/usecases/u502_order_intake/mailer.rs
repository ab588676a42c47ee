use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::mail_body::OrderEmail;
use crate::shared::config::EmailConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Delivers order notifications
#[async_trait]
pub trait OrderMailer: Send + Sync {
    async fn send(&self, email: &OrderEmail) -> Result<(), MailError>;
}

/// Used when no mail account is configured
pub struct DisabledMailer;

#[async_trait]
impl OrderMailer for DisabledMailer {
    async fn send(&self, email: &OrderEmail) -> Result<(), MailError> {
        tracing::debug!("Email disabled, not sending '{}'", email.subject);
        Ok(())
    }
}

/// SMTP + STARTTLS; the configured account sends the message to itself
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    mailbox: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig, address: &str, password: &str) -> Result<Self, MailError> {
        let mailbox: Mailbox = address.parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_server)?
            .port(config.smtp_port)
            .credentials(Credentials::new(address.to_string(), password.to_string()))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();
        Ok(Self { transport, mailbox })
    }
}

#[async_trait]
impl OrderMailer for SmtpMailer {
    async fn send(&self, email: &OrderEmail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.mailbox.clone())
            .to(self.mailbox.clone())
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())?;

        self.transport.send(message).await?;
        tracing::info!("Email sent: {}", email.subject);
        Ok(())
    }
}

/// SMTP mailer when credentials are present, a no-op otherwise.
pub fn build_mailer(config: &EmailConfig) -> Arc<dyn OrderMailer> {
    let Some((address, password)) = config.credentials() else {
        tracing::info!("Email not configured, order notifications are disabled");
        return Arc::new(DisabledMailer);
    };

    match SmtpMailer::new(config, address, password) {
        Ok(mailer) => {
            tracing::info!(
                "Order notifications via {}:{} as {}",
                config.smtp_server,
                config.smtp_port,
                address
            );
            Arc::new(mailer)
        }
        Err(e) => {
            tracing::warn!("Invalid email settings, order notifications are disabled: {}", e);
            Arc::new(DisabledMailer)
        }
    }
}
