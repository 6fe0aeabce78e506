use serde::{Deserialize, Serialize};

/// Unit suffix shown next to every earnings figure.
pub const MOX: &str = "MOX";

/// Input to an earnings lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarningsQuery {
    /// Farcaster FID of the user whose earnings are requested.
    pub subject_id: String,
}

impl EarningsQuery {
    /// Lookup for the user with FID `subject_id`.
    pub fn new(subject_id: impl Into<String>) -> Self {
        EarningsQuery {
            subject_id: subject_id.into(),
        }
    }
}

/// Earnings of a single user, normalized from the upstream response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsResult {
    /// Amount earned today, as the decimal string the API returned ("0" if absent).
    pub today_earnings: String,
    /// Amount earned over the account's lifetime ("0" if absent).
    pub lifetime_earnings: String,
    /// Farcaster profile name, when the API knows one.
    pub display_name: Option<String>,
    /// Farcaster reputation score, when the API knows one.
    pub reputation_score: Option<f64>,
}

impl Default for EarningsResult {
    fn default() -> Self {
        EarningsResult {
            today_earnings: "0".to_string(),
            lifetime_earnings: "0".to_string(),
            display_name: None,
            reputation_score: None,
        }
    }
}

/// One row of today's top earners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub entity_id: String,
    pub profile_name: Option<String>,
    pub earnings: String,
}

impl LeaderboardEntry {
    /// Name shown on the leaderboard: profile name, then FID, then "Unknown".
    pub fn label(&self) -> String {
        match (&self.profile_name, self.entity_id.is_empty()) {
            (Some(name), _) => name.clone(),
            (None, false) => format!("FID {}", self.entity_id),
            (None, true) => "Unknown".to_string(),
        }
    }
}

/// Format a decimal string with two decimals, e.g. `"3.5"` becomes `"3.50"`.
///
/// Plain decimals are rounded half-up on the string itself, so amounts keep
/// every digit no matter how long they are. Exponent forms such as `"1e-7"`
/// go through `f64`. Anything that is not a number is returned trimmed but
/// otherwise untouched, so odd upstream values are still visible to the user.
pub fn format_amount(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(rounded) = round_decimal(trimmed, 2) {
        return rounded;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{:.2}", value),
        _ => trimmed.to_string(),
    }
}

/// Round a plain decimal string (`[+-]digits[.digits]`) to `places` decimals.
fn round_decimal(raw: &str, places: usize) -> Option<String> {
    let (negative, unsigned) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !is_digits(int_part) || !is_digits(frac_part) {
        return None;
    }

    // Integer digits followed by exactly `places` fraction digits.
    let mut digits: Vec<u8> = if int_part.is_empty() { b"0".to_vec() } else { int_part.as_bytes().to_vec() };
    let int_len = digits.len();
    digits.extend(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places));

    if frac_part.as_bytes().get(places).is_some_and(|d| *d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let int_len = int_len + (digits.len() - int_len - places);
    let int_digits = String::from_utf8_lossy(&digits[..int_len]);
    let int_digits = int_digits.trim_start_matches('0');
    let int_digits = if int_digits.is_empty() { "0" } else { int_digits };
    let frac_digits = String::from_utf8_lossy(&digits[int_len..]);

    let is_zero = digits.iter().all(|d| *d == b'0');
    let sign = if negative && !is_zero { "-" } else { "" };
    Some(if places == 0 {
        format!("{}{}", sign, int_digits)
    } else {
        format!("{}{}.{}", sign, int_digits, frac_digits)
    })
}

/// Format an amount with the MOX suffix, e.g. `"100"` becomes `"100.00 MOX"`.
pub fn format_mox(raw: &str) -> String {
    format!("{} {}", format_amount(raw), MOX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mox_pads_to_two_decimals() {
        assert_eq!(format_mox("3.5"), "3.50 MOX");
        assert_eq!(format_mox("100"), "100.00 MOX");
        assert_eq!(format_mox("0"), "0.00 MOX");
    }

    #[test]
    fn test_format_amount_rounds_half_up() {
        assert_eq!(format_amount("1.005"), "1.01");
        assert_eq!(format_amount("12.3456"), "12.35");
        assert_eq!(format_amount("12.344"), "12.34");
        assert_eq!(format_amount("9.995"), "10.00");
        assert_eq!(format_amount("99.999"), "100.00");
        assert_eq!(format_amount(".5"), "0.50");
        assert_eq!(format_amount("7."), "7.00");
        assert_eq!(format_amount("-2.345"), "-2.35");
        assert_eq!(format_amount("-0.001"), "0.00");
        assert_eq!(format_amount("+0042.1"), "42.10");
    }

    #[test]
    fn test_format_amount_keeps_long_decimals_exact() {
        assert_eq!(
            format_amount("123456789012345678901.239"),
            "123456789012345678901.24"
        );
        assert_eq!(format_amount("0.12999999999999999999"), "0.13");
    }

    #[test]
    fn test_format_amount_exponent_form() {
        assert_eq!(format_amount("1.5e2"), "150.00");
        assert_eq!(format_amount("1e-7"), "0.00");
    }

    #[test]
    fn test_format_amount_keeps_non_numeric_values() {
        assert_eq!(format_amount(" n/a "), "n/a");
        assert_eq!(format_amount("NaN"), "NaN");
    }

    #[test]
    fn test_default_result_is_zero() {
        let result = EarningsResult::default();
        assert_eq!(result.today_earnings, "0");
        assert_eq!(result.lifetime_earnings, "0");
        assert!(result.display_name.is_none());
    }

    #[test]
    fn test_leaderboard_label_fallbacks() {
        let mut entry = LeaderboardEntry {
            entity_id: "42".to_string(),
            profile_name: Some("alice".to_string()),
            earnings: "1".to_string(),
        };
        assert_eq!(entry.label(), "alice");
        entry.profile_name = None;
        assert_eq!(entry.label(), "FID 42");
        entry.entity_id.clear();
        assert_eq!(entry.label(), "Unknown");
    }
}
