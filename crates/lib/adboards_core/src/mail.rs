//! Outbound mail seam.
//!
//! The mail collaborator's contract is `send message, report
//! success/failure`. Production deployments plug in a real transport behind
//! [`Mailer`]; development and tests use [`LogMailer`], which records the
//! message in the log instead of delivering it.

use async_trait::async_trait;
use thiserror::Error;

/// Mail delivery errors.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail send failed: {0}")]
    Send(String),
}

/// Sends a message to an address.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Development mailer: logs the message instead of delivering it.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        tracing::info!(to, subject, body, "outbound mail (log transport)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let mailer = LogMailer;
        assert!(mailer.send("a@example.com", "subject", "body").await.is_ok());
    }
}
