//! Graph API client for ad account spend figures.
//!
//! Queries `GET /{account_id}?fields=amount_spent,balance,spend_cap` and
//! normalizes the response into a [`BalanceSnapshot`]. The API reports the
//! three amounts in minor units, encoded either as decimal strings or as
//! numbers depending on the account; both encodings are accepted and a
//! missing field reads as zero.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::FetchError;
use crate::snapshot::BalanceSnapshot;

/// Default Graph API base URL.
const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com/v19.0";

/// Configuration for the Graph API client.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Base URL for the Graph API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("FB_GRAPH_URL")
                .unwrap_or_else(|_| DEFAULT_GRAPH_URL.to_string()),
            timeout_secs: 30,
        }
    }
}

/// Source of account balance snapshots.
///
/// Implemented by [`GraphClient`] for production and by in-memory doubles in
/// the monitor loop's tests.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Fetch the current balance snapshot.
    async fn fetch_balance(&self) -> Result<BalanceSnapshot, FetchError>;
}

/// Client for the Meta Graph API ad account endpoint.
#[derive(Debug, Clone)]
pub struct GraphClient {
    config: GraphConfig,
    account_id: String,
    access_token: String,
    client: reqwest::Client,
}

impl GraphClient {
    /// Create a new client with default configuration.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created (should never happen in practice).
    #[must_use]
    pub fn new(account_id: String, access_token: String) -> Self {
        Self::with_config(account_id, access_token, GraphConfig::default())
    }

    /// Create a new client with the given configuration.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created (should never happen in practice).
    #[must_use]
    pub fn with_config(account_id: String, access_token: String, config: GraphConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            account_id,
            access_token,
            client,
        }
    }

    async fn fetch(&self) -> Result<BalanceSnapshot, FetchError> {
        let url = format!("{}/{}", self.config.base_url, self.account_id);

        debug!(account = %self.account_id, "Fetching account balance");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("fields", "amount_spent,balance,spend_cap"),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let fields: AccountFields = serde_json::from_slice(&response.bytes().await?)?;
        let snapshot =
            BalanceSnapshot::from_minor_units(fields.amount_spent, fields.balance, fields.spend_cap);

        debug!(
            due_amount = snapshot.due_amount,
            amount_spent = snapshot.amount_spent,
            spend_cap = snapshot.spend_cap,
            "Fetched balance snapshot"
        );

        Ok(snapshot)
    }
}

#[async_trait]
impl BalanceSource for GraphClient {
    async fn fetch_balance(&self) -> Result<BalanceSnapshot, FetchError> {
        self.fetch().await
    }
}

/// Raw account fields as returned by the Graph API.
#[derive(Debug, Deserialize)]
struct AccountFields {
    #[serde(default, deserialize_with = "minor_units")]
    amount_spent: i64,
    #[serde(default, deserialize_with = "minor_units")]
    balance: i64,
    #[serde(default, deserialize_with = "minor_units")]
    spend_cap: i64,
}

/// Deserialize a minor-unit amount that may arrive as a string, a number,
/// or null.
#[allow(clippy::cast_possible_truncation)]
fn minor_units<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    match value {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| serde::de::Error::custom("amount out of range")),
        serde_json::Value::String(s) if s.is_empty() => Ok(0),
        serde_json::Value::String(s) => s
            .parse::<i64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid amount {s:?}: {e}"))),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String) -> GraphClient {
        GraphClient::with_config(
            "act_123".to_string(),
            "token".to_string(),
            GraphConfig {
                base_url,
                timeout_secs: 5,
            },
        )
    }

    #[test]
    fn test_decode_string_amounts() {
        let fields: AccountFields = serde_json::from_str(
            r#"{"amount_spent":"12345","balance":"6789","spend_cap":"50000","id":"act_123"}"#,
        )
        .unwrap();

        assert_eq!(fields.amount_spent, 12_345);
        assert_eq!(fields.balance, 6_789);
        assert_eq!(fields.spend_cap, 50_000);
    }

    #[test]
    fn test_decode_numeric_amounts() {
        let fields: AccountFields =
            serde_json::from_str(r#"{"amount_spent":100,"balance":200,"spend_cap":300}"#).unwrap();

        assert_eq!(fields.amount_spent, 100);
        assert_eq!(fields.balance, 200);
        assert_eq!(fields.spend_cap, 300);
    }

    #[test]
    fn test_decode_missing_fields_default_to_zero() {
        let fields: AccountFields = serde_json::from_str(r#"{"amount_spent":"100"}"#).unwrap();

        assert_eq!(fields.amount_spent, 100);
        assert_eq!(fields.balance, 0);
        assert_eq!(fields.spend_cap, 0);
    }

    #[tokio::test]
    async fn test_fetch_balance_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/act_123"))
            .and(query_param("fields", "amount_spent,balance,spend_cap"))
            .and(query_param("access_token", "token"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"amount_spent":"30000","balance":"50000","spend_cap":"100000","id":"act_123"}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let snapshot = client.fetch_balance().await.unwrap();

        assert!((snapshot.amount_spent - 300.0).abs() < f64::EPSILON);
        assert!((snapshot.due_amount - 500.0).abs() < f64::EPSILON);
        assert!((snapshot.spend_cap - 1000.0).abs() < f64::EPSILON);
        assert!((snapshot.remaining_budget - 700.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_fetch_balance_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/act_123"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_raw(r#"{"error":{"message":"Invalid OAuth token"}}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client.fetch_balance().await.unwrap_err();

        match err {
            FetchError::Api { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Invalid OAuth token"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
