use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://piggy_bank.db?mode=rwc";
const DEFAULT_TON_API_BASE: &str = "https://tonapi.io/v2";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    /// Postgres or SQLite; the URL scheme picks the back-end.
    pub database_url: String,
    pub ton_api_base: String,
    pub ton_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let telegram_bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| "TELEGRAM_BOT_TOKEN must be set")?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let ton_api_base = env::var("TON_API_BASE")
            .unwrap_or_else(|_| DEFAULT_TON_API_BASE.to_string());

        // An empty key means public, rate-limited access
        let ton_api_key = env::var("TON_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Config {
            telegram_bot_token,
            database_url,
            ton_api_base,
            ton_api_key,
        })
    }
}
