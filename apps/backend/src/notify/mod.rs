//! Outbound SMS notification collaborator.
//!
//! Delivery is best-effort and fire-and-forget: the draw commits first, the
//! fan-out runs afterwards off the response path, and every failure is
//! logged and swallowed. Nothing here may influence a request's outcome.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("sms transport error: {0}")]
    Transport(String),
    #[error("sms provider rejected the message: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), NotifyError>;
}

/// No-op notifier for tests and environments without SMS credentials.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), NotifyError> {
        debug!(%to, %body, "noop notifier: dropping sms");
        Ok(())
    }
}

/// Twilio-backed SMS notifier.
pub struct TwilioNotifier {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioNotifier {
    /// Build from `TWILIO_ACCOUNT_SID` / `TWILIO_AUTH_TOKEN` /
    /// `TWILIO_FROM_NUMBER`. Returns None when credentials are absent so the
    /// caller can fall back to the no-op notifier.
    pub fn from_env() -> Option<Self> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID").ok()?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN").ok()?;
        let from_number = std::env::var("TWILIO_FROM_NUMBER").ok()?;

        Some(Self {
            http: reqwest::Client::new(),
            account_sid,
            auth_token,
            from_number,
        })
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), NotifyError> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", &self.from_number), ("Body", body)])
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected(format!("{status}: {detail}")));
        }

        Ok(())
    }
}

/// Announce a completed draw to every participant with a known phone number.
///
/// Runs post-commit; failures are logged per recipient and swallowed.
pub async fn announce_draw(notifier: &dyn Notifier, group_name: &str, phones: &[String]) {
    let body = format!(
        "The Secret Santa draw for \"{group_name}\" has happened! Log in to see who you're gifting."
    );

    let mut sent = 0usize;
    for phone in phones {
        match notifier.send_sms(phone, &body).await {
            Ok(()) => sent += 1,
            Err(e) => warn!(%phone, error = %e, "draw announcement failed"),
        }
    }

    info!(group = %group_name, sent, total = phones.len(), "draw announcements dispatched");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct FlakyNotifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Notifier for FlakyNotifier {
        async fn send_sms(&self, to: &str, _body: &str) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if to.ends_with('0') {
                Err(NotifyError::Transport("unreachable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn announce_draw_swallows_failures_and_reaches_everyone() {
        let notifier = FlakyNotifier {
            calls: AtomicUsize::new(0),
        };
        let phones = vec![
            "+4915100000000".to_string(),
            "+4915100000001".to_string(),
            "+4915100000002".to_string(),
        ];

        // Must not bail on the first failure.
        announce_draw(&notifier, "Familie Weihnacht", &phones).await;
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 3);
    }
}
