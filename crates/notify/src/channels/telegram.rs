//! Telegram alert delivery channel.

use async_trait::async_trait;
use tracing::debug;

use alerts::{BalanceAlert, Tier};

use crate::api::TelegramApi;
use crate::error::ChannelError;
use crate::NotifyChannel;

/// Delivers balance alerts to a fixed Telegram chat.
pub struct TelegramChannel {
    api: TelegramApi,
    chat_id: i64,
}

impl TelegramChannel {
    /// Create a channel that sends alerts to the given chat.
    #[must_use]
    pub fn new(api: TelegramApi, chat_id: i64) -> Self {
        Self { api, chat_id }
    }

    /// Render an alert as a Markdown chat message.
    ///
    /// Escalation wording per tier: tier-90 recommends paying soon, tier-100
    /// demands immediate payment.
    fn format_message(alert: &BalanceAlert) -> String {
        let due = alert.due_amount;
        let percent = alert.percent;
        let threshold = alert.threshold;

        match alert.tier {
            Tier::Fifty => format!(
                "⚠️ *Outstanding balance alert: 50% of limit*\n\
                 The outstanding balance has reached ${due:.2}, which is {percent:.1}% \
                 of the configured threshold (${threshold:.2})."
            ),
            Tier::SeventyFive => format!(
                "🔔 *Outstanding balance alert: 75% of limit*\n\
                 The outstanding balance has reached ${due:.2}, which is {percent:.1}% \
                 of the configured threshold (${threshold:.2})."
            ),
            Tier::Ninety => format!(
                "🚨 *Outstanding balance alert: 90% of limit*\n\
                 The outstanding balance has reached ${due:.2}, which is {percent:.1}% \
                 of the configured threshold (${threshold:.2}).\n\
                 A payment is recommended soon."
            ),
            Tier::Hundred => format!(
                "🔴 *CRITICAL ALERT: spending limit exceeded*\n\
                 The outstanding balance has reached ${due:.2}, exceeding the configured \
                 threshold (${threshold:.2}).\n\
                 Immediate payment is required."
            ),
        }
    }
}

#[async_trait]
impl NotifyChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn enabled(&self) -> bool {
        true
    }

    async fn send(&self, alert: &BalanceAlert) -> Result<(), ChannelError> {
        let message = Self::format_message(alert);

        debug!(
            channel = "telegram",
            tier = alert.tier.as_str(),
            percent = alert.percent,
            "Sending alert"
        );

        self.api.send_message(self.chat_id, &message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn alert(tier: Tier, due: f64, percent: f64) -> BalanceAlert {
        BalanceAlert::new(tier, due, percent, 1000.0)
    }

    #[test]
    fn test_fifty_message_carries_figures() {
        let message = TelegramChannel::format_message(&alert(Tier::Fifty, 512.5, 51.2));

        assert!(message.starts_with("⚠️ *Outstanding balance alert: 50% of limit*"));
        assert!(message.contains("$512.50"));
        assert!(message.contains("51.2%"));
        assert!(message.contains("$1000.00"));
    }

    #[test]
    fn test_ninety_message_recommends_payment() {
        let message = TelegramChannel::format_message(&alert(Tier::Ninety, 920.0, 92.0));
        assert!(message.contains("A payment is recommended soon."));
    }

    #[test]
    fn test_hundred_message_is_critical() {
        let message = TelegramChannel::format_message(&alert(Tier::Hundred, 1050.0, 105.0));

        assert!(message.contains("CRITICAL ALERT"));
        assert!(message.contains("Immediate payment is required."));
        // 100% alert reports exceeding the threshold, not a percentage.
        assert!(!message.contains("105.0%"));
    }

    #[tokio::test]
    async fn test_send_delivers_to_configured_chat() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/bottoken/sendMessage"))
            .and(body_partial_json(serde_json::json!({"chat_id": -100})))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"ok":true,"result":{"message_id":1}}"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let api = TelegramApi::with_base_url("token", &server.uri());
        let channel = TelegramChannel::new(api, -100);

        channel.send(&alert(Tier::Fifty, 500.0, 50.0)).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_propagates_delivery_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/bottoken/sendMessage"))
            .respond_with(ResponseTemplate::new(502).set_body_raw(
                r#"{"ok":false,"description":"Bad Gateway"}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let api = TelegramApi::with_base_url("token", &server.uri());
        let channel = TelegramChannel::new(api, -100);

        assert!(channel.send(&alert(Tier::Fifty, 500.0, 50.0)).await.is_err());
    }
}
