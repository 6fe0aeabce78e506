use thiserror::Error;

pub type Result<T> = std::result::Result<T, FrameError>;

/// Failures a screen can run into.
///
/// Everything except `Config` is recovered inside the screen handler and shown
/// to the user as an error screen.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Earnings API error: {0}")]
    Upstream(String),

    #[error("Could not identify your Farcaster account. Open this frame from a Farcaster client.")]
    MissingIdentifier,

    #[error("Missing share parameters: {}", .0.join(", "))]
    IncompleteParameters(Vec<&'static str>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for FrameError {
    fn from(err: reqwest::Error) -> Self {
        FrameError::Upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_parameters_lists_keys() {
        let err = FrameError::IncompleteParameters(vec!["fid", "today"]);
        assert_eq!(err.to_string(), "Missing share parameters: fid, today");
    }

    #[test]
    fn test_upstream_message_is_kept() {
        let err = FrameError::Upstream("rate limited".to_string());
        assert!(err.to_string().contains("rate limited"));
    }
}
