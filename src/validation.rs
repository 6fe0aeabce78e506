//! Frame message validation through the Neynar API.
//!
//! The FID in `untrustedData` is whatever the client claims. When a Neynar
//! key is configured, the signed `trustedData.messageBytes` are checked and
//! the interactor Neynar reports becomes the caller.

use crate::error::{FrameError, Result};
use crate::models::request::FrameContext;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

pub const NEYNAR_VALIDATE_URL: &str = "https://api.neynar.com/v2/farcaster/frame/validate";

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    #[serde(default)]
    valid: bool,
    action: Option<ValidatedAction>,
}

#[derive(Debug, Deserialize)]
struct ValidatedAction {
    interactor: Option<Interactor>,
    tapped_button: Option<TappedButton>,
}

#[derive(Debug, Deserialize)]
struct Interactor {
    fid: u64,
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TappedButton {
    index: Option<u8>,
}

/// Client for the Neynar frame validation endpoint.
///
/// # Configuration
/// Only built when `NEYNAR_API_KEY` is set. The key is sent in the `api_key`
/// header on every call.
pub struct FrameValidator {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl FrameValidator {
    /// Create a validator sharing an existing connection pool.
    pub fn new(http: Client, api_key: impl Into<String>) -> Self {
        FrameValidator {
            http,
            endpoint: NEYNAR_VALIDATE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Validate a signed frame message and return the verified caller.
    ///
    /// Every failure maps to [`FrameError::MissingIdentifier`].
    pub async fn validate(&self, message_bytes: &str) -> Result<FrameContext> {
        debug!("Validating frame message ({} hex chars)", message_bytes.len());

        let response = self
            .http
            .post(&self.endpoint)
            .header("api_key", &self.api_key)
            .json(&json!({ "message_bytes_in_hex": message_bytes }))
            .send()
            .await
            .map_err(|e| {
                warn!("Frame validation request failed: {}", e);
                FrameError::MissingIdentifier
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            warn!("Frame validation response unreadable: {}", e);
            FrameError::MissingIdentifier
        })?;
        parse_validation(status, &body)
    }
}

/// Decode a validation response into the verified caller.
pub fn parse_validation(status: u16, body: &str) -> Result<FrameContext> {
    if !(200..300).contains(&status) {
        warn!("Frame validation returned status {}", status);
        return Err(FrameError::MissingIdentifier);
    }

    let parsed: ValidateResponse = serde_json::from_str(body).map_err(|e| {
        warn!("Frame validation response invalid: {}", e);
        FrameError::MissingIdentifier
    })?;

    let action = parsed
        .action
        .filter(|_| parsed.valid)
        .ok_or(FrameError::MissingIdentifier)?;
    let interactor = action.interactor.ok_or(FrameError::MissingIdentifier)?;

    Ok(FrameContext {
        fid: Some(interactor.fid.to_string()),
        username: interactor.username.filter(|name| !name.is_empty()),
        button_index: action.tapped_button.and_then(|b| b.index),
    })
}
