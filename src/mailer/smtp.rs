use async_trait::async_trait;
use lettre::message::{MultiPart, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::SmtpConfig;

use super::{Mailer, MailerError, OutgoingEmail};

// ============================================================================
// SMTP Mailer (lettre)
// ============================================================================

/// SMTP-backed mailer. Builds a fresh transport per message; volume here is
/// one email per order, pooling would be noise.
#[derive(Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Credentials,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Result<Self, MailerError> {
        let from = format!("{} <{}>", config.from_name, config.from_email)
            .parse()
            .map_err(|e| MailerError::Address(format!("invalid from address: {e}")))?;

        Ok(Self {
            host: config.host,
            port: config.port,
            credentials: Credentials::new(config.username, config.password),
            from,
        })
    }

    fn build_transport(&self) -> Result<SmtpTransport, MailerError> {
        Ok(SmtpTransport::relay(&self.host)
            .map_err(|e| MailerError::Send(format!("smtp relay error: {e}")))?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailerError> {
        let to = email
            .to
            .parse()
            .map_err(|e| MailerError::Address(format!("invalid to address: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject)
            .multipart(MultiPart::alternative_plain_html(
                email.text_body,
                email.html_body,
            ))
            .map_err(|e| MailerError::Build(e.to_string()))?;

        let transport = self.build_transport()?;

        // lettre's blocking transport, moved off the async worker.
        tokio::task::spawn_blocking(move || {
            transport
                .send(&message)
                .map(|_| ())
                .map_err(|e| MailerError::Send(e.to_string()))
        })
        .await
        .map_err(|e| MailerError::Send(format!("send task failed: {e}")))?
    }
}
