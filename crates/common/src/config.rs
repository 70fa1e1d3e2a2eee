/// All configuration loaded from environment variables at startup.
/// Constructed once in `main` and passed down; core logic never reads the
/// environment itself. Missing required variables cause an immediate panic
/// with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // Telegram
    pub telegram_token: String,
    pub telegram_chat_id: i64,

    // Kline timeframe used for signal windows
    pub kline_timeframe: String,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let telegram_chat_id = required_env("TELEGRAM_CHAT_ID")
            .parse::<i64>()
            .unwrap_or_else(|_| panic!("TELEGRAM_CHAT_ID must be a numeric chat id"));

        Config {
            database_url: required_env("DATABASE_URL"),
            telegram_token: required_env("TELEGRAM_TOKEN"),
            telegram_chat_id,
            kline_timeframe: optional_env("KLINE_TIMEFRAME").unwrap_or_else(|| "1h".to_string()),
        }
    }
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
