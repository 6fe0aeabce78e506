//! Environment configuration for the frame functions.
//!
//! | key                | required | default                            |
//! |--------------------|----------|------------------------------------|
//! | `AIRSTACK_API_KEY` | yes      |                                    |
//! | `AIRSTACK_API_URL` | no       | `https://api.airstack.xyz/graphql` |
//! | `NEYNAR_API_KEY`   | no       | frame validation disabled          |
//! | `PUBLIC_URL`       | no       | derived from the request host      |
//!
//! Blank values are treated as unset.

use crate::error::{FrameError, Result};

pub const DEFAULT_AIRSTACK_API_URL: &str = "https://api.airstack.xyz/graphql";

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the Airstack GraphQL API.
    pub airstack_api_key: String,
    pub airstack_api_url: String,
    /// Enables Neynar frame-message validation when present.
    pub neynar_api_key: Option<String>,
    /// Absolute base URL of the deployment, without trailing slash.
    pub public_url: Option<String>,
}

impl Config {
    /// Load configuration from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let airstack_api_key = get("AIRSTACK_API_KEY")
            .ok_or_else(|| FrameError::Config("AIRSTACK_API_KEY is not set".to_string()))?;

        Ok(Config {
            airstack_api_key,
            airstack_api_url: get("AIRSTACK_API_URL")
                .unwrap_or_else(|| DEFAULT_AIRSTACK_API_URL.to_string()),
            neynar_api_key: get("NEYNAR_API_KEY"),
            public_url: get("PUBLIC_URL").map(|url| url.trim_end_matches('/').to_string()),
        })
    }
}
