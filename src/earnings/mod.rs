//! Earnings client for the Airstack GraphQL API.
//!
//! One POST per lookup, authenticated with a bearer token. No retries and no
//! timeout beyond what the transport applies.

pub mod query;

use crate::config::Config;
use crate::error::{FrameError, Result};
use crate::models::earnings::{EarningsQuery, EarningsResult, LeaderboardEntry};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Anything that can answer earnings lookups for the screens.
#[async_trait]
pub trait EarningsSource: Send + Sync {
    /// Earnings of one user.
    async fn fetch(&self, query: &EarningsQuery) -> Result<EarningsResult>;

    /// Today's top earners, highest first, at most `limit` entries.
    async fn top_earners(&self, limit: usize) -> Result<Vec<LeaderboardEntry>>;
}

/// Airstack-backed [`EarningsSource`].
pub struct EarningsClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl EarningsClient {
    /// Create a client on top of an existing connection pool.
    ///
    /// # Arguments
    /// * `http` - Pool shared with the other outbound clients of the function
    /// * `config` - Supplies the GraphQL endpoint and the bearer token
    pub fn with_http(http: Client, config: &Config) -> Self {
        EarningsClient {
            http,
            endpoint: config.airstack_api_url.clone(),
            api_key: config.airstack_api_key.clone(),
        }
    }

    async fn post(&self, body: Value) -> Result<(u16, String)> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Airstack request failed: {}", e);
                FrameError::from(e)
            })?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok((status, text))
    }
}

#[async_trait]
impl EarningsSource for EarningsClient {
    async fn fetch(&self, query: &EarningsQuery) -> Result<EarningsResult> {
        debug!("Fetching Moxie earnings for fid {}", query.subject_id);

        let (status, body) = self
            .post(json!({
                "query": query::USER_EARNINGS_QUERY,
                "variables": { "fid": query.subject_id },
            }))
            .await?;

        let result = query::parse_user_earnings(status, &body).inspect_err(|e| {
            warn!("Airstack earnings lookup for fid {} failed: {}", query.subject_id, e);
        })?;

        debug!(
            "Earnings for fid {}: today={} lifetime={}",
            query.subject_id, result.today_earnings, result.lifetime_earnings
        );
        Ok(result)
    }

    async fn top_earners(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        debug!("Fetching top {} Moxie earners", limit);

        let (status, body) = self
            .post(json!({
                "query": query::TOP_EARNERS_QUERY,
                "variables": { "limit": limit },
            }))
            .await?;

        query::parse_top_earners(status, &body, limit).inspect_err(|e| {
            warn!("Airstack top earners lookup failed: {}", e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn config(url: &str) -> Config {
        Config {
            airstack_api_key: "test-key".to_string(),
            airstack_api_url: url.to_string(),
            neynar_api_key: None,
            public_url: None,
        }
    }

    fn client(url: &str) -> EarningsClient {
        EarningsClient::with_http(Client::new(), &config(url))
    }

    /// Serve exactly one HTTP request with a canned JSON answer.
    ///
    /// Returns the endpoint URL and a handle resolving to the raw request.
    async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/graphql", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&chunk[..n]);
                if let Some(end) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&raw[..end]).to_lowercase();
                    let length = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8(raw).unwrap()
        });

        (url, handle)
    }

    fn split_request(raw: &str) -> (String, serde_json::Value) {
        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        (head.to_lowercase(), serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_client_uses_configured_endpoint() {
        let client = client("http://127.0.0.1:9/graphql");
        assert_eq!(client.endpoint, "http://127.0.0.1:9/graphql");
        assert_eq!(client.api_key, "test-key");
    }

    #[tokio::test]
    async fn test_fetch_posts_query_with_bearer_token() {
        let (url, server) = serve_once(
            200,
            r#"{"data":{
                "today":{"FarcasterMoxieEarningStat":[{"allEarningsAmount":3.5}]},
                "lifetime":{"FarcasterMoxieEarningStat":[{"allEarningsAmount":100}]},
                "socials":{"Social":[{"profileName":"alice"}]}
            }}"#,
        )
        .await;

        let result = client(&url).fetch(&EarningsQuery::new("42")).await.unwrap();
        assert_eq!(result.today_earnings, "3.5");
        assert_eq!(result.lifetime_earnings, "100");
        assert_eq!(result.display_name.as_deref(), Some("alice"));

        let raw = server.await.unwrap();
        let (head, body) = split_request(&raw);
        assert!(head.starts_with("post /graphql http/1.1"));
        assert!(head.contains("authorization: bearer test-key"));
        assert!(head.contains("content-type: application/json"));
        assert_eq!(body["variables"]["fid"], "42");
        assert_eq!(body["query"], query::USER_EARNINGS_QUERY);
    }

    #[tokio::test]
    async fn test_fetch_error_envelope_is_upstream_error() {
        let (url, server) = serve_once(200, r#"{"errors":[{"message":"x"}]}"#).await;

        let err = client(&url).fetch(&EarningsQuery::new("42")).await.unwrap_err();
        assert!(matches!(err, FrameError::Upstream(ref m) if m == "x"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_upstream_error() {
        let (url, server) = serve_once(500, r#"{"data":null}"#).await;

        let err = client(&url).fetch(&EarningsQuery::new("42")).await.unwrap_err();
        assert!(matches!(err, FrameError::Upstream(ref m) if m.contains("500")));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_top_earners_sends_limit() {
        let (url, server) = serve_once(
            200,
            r#"{"data":{"today":{"FarcasterMoxieEarningStat":[{"entityId":"1","allEarningsAmount":2}]}}}"#,
        )
        .await;

        let entries = client(&url).top_earners(5).await.unwrap();
        assert_eq!(entries.len(), 1);

        let (_, body) = split_request(&server.await.unwrap());
        assert_eq!(body["variables"]["limit"], 5);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_upstream_error() {
        let err = client("http://127.0.0.1:9/graphql")
            .fetch(&EarningsQuery::new("42"))
            .await
            .unwrap_err();
        assert!(matches!(err, FrameError::Upstream(_)));
    }
}
