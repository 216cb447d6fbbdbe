//! Mail delivery over an implicit-TLS SMTP relay using lettre.

use crate::config::Config;
use crate::error::MailError;
use crate::notify::compose::Notification;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

/// Delivers notifications - enables mocking for tests.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends a notification to the configured recipient.
    async fn send(&self, notification: &Notification) -> Result<(), MailError>;
}

/// Sends notifications through an authenticated SMTP relay.
///
/// Like the fetch side, no timeout is set on the submission.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    subject: String,
}

impl SmtpMailer {
    /// Creates a mailer that logs in as `sender_mail` and writes to `notification_mail`.
    pub fn new(config: &Config) -> Result<Self, MailError> {
        let from: Mailbox = config.sender_mail.parse()?;
        let to: Mailbox = config.notification_mail.parse()?;

        debug!("Configuring SMTP relay {}:{}", config.smtp_host, config.smtp_port);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(config.sender_mail.clone(), config.sender_pass.clone()))
            .build();

        Ok(Self { transport, from, to, subject: config.subject.clone() })
    }

    /// Builds the `multipart/alternative` message for a notification.
    pub fn message(&self, notification: &Notification) -> Result<Message, MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(self.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                notification.plain.clone(),
                notification.html.clone(),
            ))?;

        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), MailError> {
        let message = self.message(notification)?;

        info!("Sending notification to {}", self.to);
        self.transport.send(message).await?;

        Ok(())
    }
}

/// Mailer for runs with notifications disabled; sending does nothing.
pub struct NoMailer;

#[async_trait]
impl Mailer for NoMailer {
    async fn send(&self, _notification: &Notification) -> Result<(), MailError> {
        debug!("Notifications disabled, dropping message");
        Ok(())
    }
}
