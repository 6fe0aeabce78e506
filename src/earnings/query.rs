//! GraphQL documents and response decoding for the Airstack earnings API.
//!
//! Responses use the usual `{ data, errors }` envelope. Every result array is
//! optional: missing or empty arrays fall back to zero values.

use crate::error::{FrameError, Result};
use crate::models::earnings::{EarningsResult, LeaderboardEntry};
use serde::Deserialize;
use serde_json::Value;

/// Today's and lifetime earnings plus the profile of one user.
pub const USER_EARNINGS_QUERY: &str = r#"
query MoxieUserEarnings($fid: String!) {
  today: FarcasterMoxieEarningStats(
    input: {timeframe: TODAY, blockchain: ALL, filter: {entityType: {_eq: USER}, entityId: {_eq: $fid}}}
  ) {
    FarcasterMoxieEarningStat {
      allEarningsAmount
    }
  }
  lifetime: FarcasterMoxieEarningStats(
    input: {timeframe: LIFETIME, blockchain: ALL, filter: {entityType: {_eq: USER}, entityId: {_eq: $fid}}}
  ) {
    FarcasterMoxieEarningStat {
      allEarningsAmount
    }
  }
  socials: Socials(
    input: {filter: {dappName: {_eq: farcaster}, userId: {_eq: $fid}}, blockchain: ethereum}
  ) {
    Social {
      profileName
      farcasterScore {
        farScore
      }
    }
  }
}
"#;

/// Today's top earning users.
pub const TOP_EARNERS_QUERY: &str = r#"
query MoxieTopEarners($limit: Int!) {
  today: FarcasterMoxieEarningStats(
    input: {timeframe: TODAY, blockchain: ALL, filter: {entityType: {_eq: USER}}, order: {allEarningsAmount: DESC}, limit: $limit}
  ) {
    FarcasterMoxieEarningStat {
      entityId
      allEarningsAmount
      socials {
        profileName
      }
    }
  }
}
"#;

/// Shown when the API reports an error without a message.
const UNKNOWN_GRAPHQL_ERROR: &str = "the API reported an error without a message";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct UserEarningsData {
    today: Option<StatBlock>,
    lifetime: Option<StatBlock>,
    socials: Option<SocialBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct TopEarnersData {
    today: Option<StatBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct StatBlock {
    #[serde(rename = "FarcasterMoxieEarningStat")]
    stats: Option<Vec<EarningStat>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EarningStat {
    entity_id: Option<String>,
    /// Airstack reports a float, older deployments a string.
    all_earnings_amount: Option<Value>,
    socials: Option<Vec<StatSocial>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatSocial {
    profile_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SocialBlock {
    #[serde(rename = "Social")]
    social: Option<Vec<Social>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Social {
    profile_name: Option<String>,
    farcaster_score: Option<FarcasterScore>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FarcasterScore {
    far_score: Option<f64>,
}

/// Decode a user-earnings response.
pub fn parse_user_earnings(status: u16, body: &str) -> Result<EarningsResult> {
    let data: UserEarningsData = decode(status, body)?.unwrap_or_default();

    let profile = first(data.socials.and_then(|s| s.social));
    Ok(EarningsResult {
        today_earnings: first_amount(data.today),
        lifetime_earnings: first_amount(data.lifetime),
        display_name: profile
            .as_ref()
            .and_then(|p| p.profile_name.clone())
            .filter(|name| !name.is_empty()),
        reputation_score: profile
            .and_then(|p| p.farcaster_score)
            .and_then(|score| score.far_score),
    })
}

/// Decode a top-earners response, keeping at most `limit` entries by amount.
pub fn parse_top_earners(status: u16, body: &str, limit: usize) -> Result<Vec<LeaderboardEntry>> {
    let data: TopEarnersData = decode(status, body)?.unwrap_or_default();

    let mut entries: Vec<LeaderboardEntry> = data
        .today
        .and_then(|block| block.stats)
        .unwrap_or_default()
        .into_iter()
        .map(|stat| LeaderboardEntry {
            entity_id: stat.entity_id.unwrap_or_default(),
            profile_name: first(stat.socials)
                .and_then(|s| s.profile_name)
                .filter(|name| !name.is_empty()),
            earnings: amount_string(stat.all_earnings_amount),
        })
        .collect();

    entries.sort_by(|a, b| amount_value(&b.earnings).total_cmp(&amount_value(&a.earnings)));
    entries.truncate(limit);
    Ok(entries)
}

fn decode<T: serde::de::DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>> {
    if !(200..300).contains(&status) {
        return Err(FrameError::Upstream(format!("HTTP error! status: {}", status)));
    }

    let envelope: Envelope<T> = serde_json::from_str(body)
        .map_err(|e| FrameError::Upstream(format!("invalid response: {}", e)))?;

    if let Some(error) = envelope.errors.as_ref().and_then(|errors| errors.first()) {
        let message = match error.message.trim() {
            "" => UNKNOWN_GRAPHQL_ERROR.to_string(),
            message => message.to_string(),
        };
        return Err(FrameError::Upstream(message));
    }

    Ok(envelope.data)
}

fn first<T>(items: Option<Vec<T>>) -> Option<T> {
    items.and_then(|items| items.into_iter().next())
}

fn first_amount(block: Option<StatBlock>) -> String {
    amount_string(first(block.and_then(|b| b.stats)).and_then(|stat| stat.all_earnings_amount))
}

fn amount_string(value: Option<Value>) -> String {
    match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        _ => "0".to_string(),
    }
}

fn amount_value(amount: &str) -> f64 {
    amount.parse().unwrap_or(0.0)
}
