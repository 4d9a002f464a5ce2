//! Thin Telegram Bot API client.
//!
//! Covers the two methods the monitor needs: `sendMessage` for alerts and
//! command replies, and `getUpdates` for long-polling chat commands.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChannelError;

/// Default Bot API base URL.
const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Default per-request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Extra seconds allowed on top of the long-poll timeout before the HTTP
/// request itself is aborted.
const LONG_POLL_GRACE_SECS: u64 = 10;

/// Client for the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramApi {
    base_url: String,
    client: reqwest::Client,
}

impl TelegramApi {
    /// Create a client for the given bot token.
    #[must_use]
    pub fn new(token: &str) -> Self {
        let base_url = std::env::var("TELEGRAM_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::with_base_url(token, &base_url)
    }

    /// Create a client against a specific API base URL.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created (should never happen in practice).
    #[must_use]
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("{}/bot{token}", base_url.trim_end_matches('/')),
            client,
        }
    }

    /// Send a Markdown-formatted message to a chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), ChannelError> {
        let url = format!("{}/sendMessage", self.base_url);
        let payload = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "Markdown",
        };

        debug!(chat_id, "Sending Telegram message");

        let response = self.client.post(&url).json(&payload).send().await?;
        Self::decode::<serde_json::Value>(response).await?;

        Ok(())
    }

    /// Long-poll for new updates.
    ///
    /// Blocks server-side for up to `timeout_secs`; returns an empty vec when
    /// nothing arrived. Pass the last seen `update_id + 1` as `offset` to
    /// acknowledge processed updates.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, ChannelError> {
        let url = format!("{}/getUpdates", self.base_url);

        let mut request = self
            .client
            .get(&url)
            .query(&[("timeout", timeout_secs)])
            .query(&[("allowed_updates", r#"["message"]"#)])
            .timeout(std::time::Duration::from_secs(
                timeout_secs + LONG_POLL_GRACE_SECS,
            ));
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        let response = request.send().await?;
        Self::decode::<Vec<Update>>(response).await
    }

    /// Decode a Bot API response envelope, surfacing `ok=false` as an error.
    async fn decode<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, ChannelError> {
        let status = response.status();
        let body = response.bytes().await?;

        let envelope: ApiResponse<T> = serde_json::from_slice(&body).map_err(|e| {
            ChannelError::Telegram(format!(
                "unparseable response (HTTP {status}): {e}"
            ))
        })?;

        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(ChannelError::Telegram(description));
        }

        envelope
            .result
            .ok_or_else(|| ChannelError::Telegram("ok response without result".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'a str,
}

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<T>,
}

/// An incoming update from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic update identifier
    pub update_id: i64,
    /// The message, if this update carries one
    #[serde(default)]
    pub message: Option<Message>,
}

/// An incoming chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Chat the message was sent in
    pub chat: Chat,
    /// Text content, absent for stickers, photos and the like
    #[serde(default)]
    pub text: Option<String>,
}

/// The chat a message belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Unique chat identifier
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_message_posts_markdown_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/bottoken/sendMessage"))
            .and(body_partial_json(serde_json::json!({
                "chat_id": 42,
                "text": "hello",
                "parse_mode": "Markdown",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"ok":true,"result":{"message_id":1}}"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let api = TelegramApi::with_base_url("token", &server.uri());
        api.send_message(42, "hello").await.unwrap();
    }

    #[tokio::test]
    async fn test_send_message_surfaces_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/bottoken/sendMessage"))
            .respond_with(ResponseTemplate::new(400).set_body_raw(
                r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let api = TelegramApi::with_base_url("token", &server.uri());
        let err = api.send_message(42, "hello").await.unwrap_err();

        match err {
            ChannelError::Telegram(description) => {
                assert!(description.contains("chat not found"));
            }
            other => panic!("expected Telegram error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_updates_parses_messages() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bottoken/getUpdates"))
            .and(query_param("offset", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"ok":true,"result":[
                    {"update_id":7,"message":{"message_id":10,"chat":{"id":99,"type":"private"},"text":"/balance"}},
                    {"update_id":8,"message":{"message_id":11,"chat":{"id":99,"type":"private"}}}
                ]}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let api = TelegramApi::with_base_url("token", &server.uri());
        let updates = api.get_updates(Some(7), 0).await.unwrap();

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].update_id, 7);
        assert_eq!(updates[0].message.as_ref().unwrap().chat.id, 99);
        assert_eq!(
            updates[0].message.as_ref().unwrap().text.as_deref(),
            Some("/balance")
        );
        assert!(updates[1].message.as_ref().unwrap().text.is_none());
    }
}
