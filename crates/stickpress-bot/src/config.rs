//! Environment-backed configuration.

use anyhow::Context;

/// Runtime settings for the bot process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot API token, as issued by BotFather.
    pub bot_token: String,
    /// TCP port the webhook server listens on.
    pub port: u16,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let bot_token =
            std::env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN is not set")?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT is not a valid port number")?,
            Err(_) => 8080,
        };

        Ok(Self { bot_token, port })
    }
}
