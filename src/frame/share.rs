//! Share links for the Warpcast composer.

use crate::models::directive::Screen;
use crate::models::earnings::{format_amount, format_mox, EarningsResult};

pub const COMPOSE_URL: &str = "https://warpcast.com/~/compose";

/// Query keys the share screen reads.
pub const PARAM_FID: &str = "fid";
pub const PARAM_TODAY: &str = "today";
pub const PARAM_LIFETIME: &str = "lifetime";

/// URL of the share screen showing these figures.
pub fn share_screen_url(base_url: &str, fid: &str, earnings: &EarningsResult) -> String {
    format!(
        "{}{}?{}={}&{}={}&{}={}",
        base_url,
        Screen::Share.route(),
        PARAM_FID,
        urlencoding::encode(fid),
        PARAM_TODAY,
        urlencoding::encode(&format_amount(&earnings.today_earnings)),
        PARAM_LIFETIME,
        urlencoding::encode(&format_amount(&earnings.lifetime_earnings)),
    )
}

/// Text of the cast composed when sharing.
pub fn share_text(earnings: &EarningsResult) -> String {
    format!(
        "I earned {} today and {} in total on Moxie! Check your earnings:",
        format_mox(&earnings.today_earnings),
        format_mox(&earnings.lifetime_earnings),
    )
}

/// Warpcast compose link with the share text and the share screen embedded.
pub fn compose_link(base_url: &str, fid: &str, earnings: &EarningsResult) -> String {
    format!(
        "{}?text={}&embeds[]={}",
        COMPOSE_URL,
        urlencoding::encode(&share_text(earnings)),
        urlencoding::encode(&share_screen_url(base_url, fid, earnings)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::parse_query;

    fn earnings() -> EarningsResult {
        EarningsResult {
            today_earnings: "3.5".to_string(),
            lifetime_earnings: "100".to_string(),
            ..EarningsResult::default()
        }
    }

    #[test]
    fn test_share_screen_url() {
        let url = share_screen_url("https://moxie.example.com", "42", &earnings());
        assert_eq!(
            url,
            "https://moxie.example.com/api/share?fid=42&today=3.50&lifetime=100.00"
        );
    }

    #[test]
    fn test_compose_link_round_trips_text() {
        let link = compose_link("https://moxie.example.com", "42", &earnings());
        let (base, query) = link.split_once('?').unwrap();
        assert_eq!(base, COMPOSE_URL);
        assert!(!query.contains(' '));

        let params = parse_query(query);
        let text = params.get("text").unwrap();
        assert!(text.contains("3.50 MOX"));
        assert!(text.contains("100.00 MOX"));
        assert_eq!(
            params.get("embeds[]").map(String::as_str),
            Some("https://moxie.example.com/api/share?fid=42&today=3.50&lifetime=100.00")
        );
    }
}
