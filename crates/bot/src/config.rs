//! Runtime configuration, assembled once at startup.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Default polling cadence: every two hours.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2 * 60 * 60;

/// Default notification state file.
pub const DEFAULT_STATE_FILE: &str = "notification_state.json";

/// Default keep-alive server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Validated, immutable configuration for the bot.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ad account identifier (e.g. `act_1234567890`).
    pub account_id: String,
    /// Graph API access token.
    pub access_token: String,
    /// Telegram bot token.
    pub bot_token: String,
    /// Chat that receives threshold alerts.
    pub chat_id: i64,
    /// Chat allowed to run administrative commands.
    pub admin_chat_id: i64,
    /// Spending threshold in major currency units. Always positive.
    pub threshold: f64,
    /// How often the balance is checked.
    pub poll_interval: Duration,
    /// Notification state file path.
    pub state_path: PathBuf,
    /// Keep-alive server port.
    pub port: u16,
}

impl Config {
    /// Create configuration from environment variables.
    ///
    /// # Required Environment Variables
    /// - `FB_AD_ACCOUNT_ID`: ad account identifier
    /// - `FB_ACCESS_TOKEN`: Graph API access token
    /// - `TELEGRAM_BOT_TOKEN`: bot token
    /// - `TELEGRAM_CHAT_ID`: alert chat id
    /// - `THRESHOLD`: positive spending threshold in major currency units
    ///
    /// # Optional Environment Variables
    /// - `ADMIN_CHAT_ID`: admin chat id (default: the alert chat id)
    /// - `POLL_INTERVAL_SECS`: polling cadence (default: 7200)
    /// - `STATE_FILE`: state file path (default: `notification_state.json`)
    /// - `PORT`: keep-alive server port (default: 3000)
    pub fn from_env() -> Result<Self> {
        let account_id = std::env::var("FB_AD_ACCOUNT_ID")
            .context("FB_AD_ACCOUNT_ID environment variable not set")?;

        let access_token = std::env::var("FB_ACCESS_TOKEN")
            .context("FB_ACCESS_TOKEN environment variable not set")?;

        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .context("TELEGRAM_BOT_TOKEN environment variable not set")?;

        let chat_id = parse_chat_id(
            &std::env::var("TELEGRAM_CHAT_ID")
                .context("TELEGRAM_CHAT_ID environment variable not set")?,
        )
        .context("TELEGRAM_CHAT_ID is invalid")?;

        let admin_chat_id = match std::env::var("ADMIN_CHAT_ID") {
            Ok(raw) => parse_chat_id(&raw).context("ADMIN_CHAT_ID is invalid")?,
            Err(_) => chat_id,
        };

        let threshold = parse_threshold(
            &std::env::var("THRESHOLD").context("THRESHOLD environment variable not set")?,
        )?;

        let poll_interval = Duration::from_secs(
            std::env::var("POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
        );

        let state_path = std::env::var("STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_FILE));

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            account_id,
            access_token,
            bot_token,
            chat_id,
            admin_chat_id,
            threshold,
            poll_interval,
            state_path,
            port,
        })
    }
}

/// Parse and validate the spending threshold.
pub(crate) fn parse_threshold(raw: &str) -> Result<f64> {
    let threshold: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("THRESHOLD is not a number: {raw:?}"))?;

    if !threshold.is_finite() || threshold <= 0.0 {
        bail!("THRESHOLD must be a positive number, got {threshold}");
    }

    Ok(threshold)
}

/// Parse a Telegram chat id (may be negative for groups).
pub(crate) fn parse_chat_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .with_context(|| format!("not a chat id: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threshold_accepts_positive_numbers() {
        assert!((parse_threshold("1000").unwrap() - 1000.0).abs() < f64::EPSILON);
        assert!((parse_threshold("250.5").unwrap() - 250.5).abs() < f64::EPSILON);
        assert!((parse_threshold(" 42 ").unwrap() - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_threshold_rejects_non_positive() {
        assert!(parse_threshold("0").is_err());
        assert!(parse_threshold("-100").is_err());
        assert!(parse_threshold("inf").is_err());
        assert!(parse_threshold("NaN").is_err());
    }

    #[test]
    fn test_parse_threshold_rejects_garbage() {
        assert!(parse_threshold("").is_err());
        assert!(parse_threshold("a lot").is_err());
    }

    #[test]
    fn test_parse_chat_id_accepts_group_ids() {
        assert_eq!(parse_chat_id("123456").unwrap(), 123_456);
        assert_eq!(parse_chat_id("-1001234567890").unwrap(), -1_001_234_567_890);
    }

    #[test]
    fn test_parse_chat_id_rejects_garbage() {
        assert!(parse_chat_id("@channel").is_err());
        assert!(parse_chat_id("").is_err());
    }
}
