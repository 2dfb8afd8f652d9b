use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Mailer, MailerError, OutgoingEmail};

// ============================================================================
// Recording Mailer - test double
// ============================================================================

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails, for the swallowed-error path.
    pub fn failing() -> Self {
        let mailer = Self::new();
        mailer.fail.store(true, Ordering::SeqCst);
        mailer
    }

    pub fn sent_emails(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailerError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MailerError::Send("simulated send failure".to_string()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}
