// ============================================================================
// Notification Layer - order outcome emails
// ============================================================================
//
// The workflow hands a fully-rendered message to the `Mailer` trait and
// ignores the outcome beyond logging it: a failed email must never fail an
// order. One attempt, no retry.
//
// ============================================================================

pub mod smtp;
pub mod templates;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

pub use smtp::SmtpMailer;

/// A fully-rendered outgoing message: recipient, subject, and both body
/// forms (HTML with a plain-text alternative).
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("invalid email address: {0}")]
    Address(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("smtp send failed: {0}")]
    Send(String),
}

/// Notification collaborator. Errors are caller-visible but the checkout
/// workflow deliberately catches and discards them.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailerError>;
}
