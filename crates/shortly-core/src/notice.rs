// ── Notification channel ──
//
// Controllers report the outcome of user-triggered operations here.
// Presentation subscribes and renders them as toasts, log lines, etc.
// Sending never fails: with no subscribers the notice is dropped.

use serde::Serialize;
use strum::Display;
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::CoreError;

const NOTICE_CHANNEL_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A human-readable success or failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Sending half of the notice channel, shared by every controller.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notice>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(NOTICE_CHANNEL_SIZE);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub(crate) fn success(&self, message: impl Into<String>) {
        self.send(NoticeLevel::Success, message.into());
    }

    pub(crate) fn error(&self, err: &CoreError) {
        self.send(NoticeLevel::Error, err.user_message());
    }

    fn send(&self, level: NoticeLevel, message: String) {
        if self.tx.send(Notice { level, message }).is_err() {
            debug!(%level, "notice dropped, no subscribers");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_notices_in_order() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        notifier.success("Link created");
        notifier.error(&CoreError::NotAuthenticated);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.level, NoticeLevel::Success);
        assert_eq!(first.message, "Link created");
        let second = rx.recv().await.unwrap();
        assert_eq!(second.level, NoticeLevel::Error);
        assert_eq!(second.message, "Not logged in");
    }

    #[test]
    fn sending_without_subscribers_is_harmless() {
        Notifier::new().success("nobody listening");
    }
}
