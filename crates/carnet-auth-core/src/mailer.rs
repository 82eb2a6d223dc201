//! Outbound verification email
//!
//! Email delivery is a collaborator behind the `Mailer` trait; delivery
//! failure is reported but never rolls back a committed registration.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

/// Mail delivery errors
#[derive(Error, Debug)]
pub enum MailError {
    /// Address failed to parse
    #[error("invalid mail address: {0}")]
    InvalidAddress(String),

    /// Message could not be built
    #[error("failed to build message: {0}")]
    Build(String),

    /// SMTP transport failure
    #[error("mail transport error: {0}")]
    Transport(String),
}

/// Outbound email capability
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a verification code to an address
    async fn send_verification(&self, to: &str, code: &str) -> Result<(), MailError>;
}

/// SMTP settings for the mailer
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// From address for outbound mail
    pub from: String,
}

/// Mailer over an async SMTP transport (STARTTLS)
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a mailer from SMTP settings
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let from: Mailbox = settings
            .from
            .parse()
            .map_err(|_| MailError::InvalidAddress(settings.from.clone()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification(&self, to: &str, code: &str) -> Result<(), MailError> {
        let to: Mailbox = to
            .parse()
            .map_err(|_| MailError::InvalidAddress(to.to_string()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Email verification")
            .body(format!("Your verification code is: {code}"))
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(())
    }
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}
