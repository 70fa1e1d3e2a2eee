use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::RequestError;
use tracing::warn;

use common::{Error, Notifier, Result};

use crate::retry::RetryPolicy;

/// Sends closure messages to a single configured chat, in Markdown.
///
/// Network hiccups retry with exponential backoff; an explicit rate-limit
/// response sleeps the server-specified duration instead. Anything else
/// (bad token, malformed markup) fails immediately. Once attempts are
/// exhausted the final error propagates to the caller.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
    retry: RetryPolicy,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: i64, retry: RetryPolicy) -> Self {
        Self {
            bot: Bot::new(token),
            chat_id: ChatId(chat_id),
            retry,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        for attempt in 1..=self.retry.max_attempts {
            let result = self
                .bot
                .send_message(self.chat_id, text)
                .parse_mode(ParseMode::Markdown)
                .await;

            match result {
                Ok(_) => return Ok(()),
                Err(RequestError::RetryAfter(after)) => {
                    warn!(attempt, retry_after = ?after, "Telegram rate limit hit");
                    if attempt == self.retry.max_attempts {
                        return Err(Error::Notify("rate limited, retries exhausted".into()));
                    }
                    tokio::time::sleep(after).await;
                }
                Err(e) if is_transient(&e) => {
                    if attempt == self.retry.max_attempts {
                        return Err(Error::Notify(e.to_string()));
                    }
                    let delay = self.retry.delay_for(attempt);
                    warn!(attempt, error = %e, delay = ?delay, "Telegram send failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(Error::Notify(e.to_string())),
            }
        }

        Err(Error::Notify("retries exhausted".into()))
    }
}

fn is_transient(err: &RequestError) -> bool {
    matches!(err, RequestError::Network(_) | RequestError::Io(_))
}
