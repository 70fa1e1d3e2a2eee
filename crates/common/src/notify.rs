use async_trait::async_trait;

use crate::Result;

/// Abstraction over the outbound notification channel.
///
/// `TelegramNotifier` in `crates/telegram` implements this for production
/// delivery. Tests substitute in-memory fakes to observe what would have
/// been sent.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message. Implementations retry transient failures
    /// internally and return an error only once retries are exhausted.
    async fn send(&self, text: &str) -> Result<()>;
}
