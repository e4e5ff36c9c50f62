//! Schedule directive parsing.

use std::time::Duration;

use fancy_regex::Regex;

use crate::common::error::DraftError;

/// Parse a `schedule:` value into a total delay.
///
/// The value is a sequence of `<integer><unit>` tokens where the unit is
/// `s`, `m`, `h`, or `d`; tokens combine ("1h 30m" is ninety minutes).
/// A malformed token fails the whole value.
pub fn parse_delay(value: &str) -> Result<Duration, DraftError> {
    let token_shape = Regex::new(r"^(?:\d+\s*[smhd])+$").unwrap();
    let token = Regex::new(r"(\d+)\s*([smhd])").unwrap();

    let trimmed = value.trim().to_lowercase();
    let bad = || DraftError::BadDuration {
        value: value.trim().to_string(),
    };

    if trimmed.is_empty() {
        return Err(bad());
    }

    // Every whitespace-separated chunk must itself be token-shaped, so
    // stray text like "1h later" is rejected rather than ignored.
    for chunk in trimmed.split_whitespace() {
        if !token_shape.is_match(chunk).unwrap_or(false) {
            return Err(bad());
        }
    }

    let mut total = 0u64;
    for caps in token.captures_iter(&trimmed).flatten() {
        let amount: u64 = caps[1].parse().map_err(|_| bad())?;
        let unit_seconds = match &caps[2] {
            "s" => 1,
            "m" => 60,
            "h" => 3600,
            "d" => 86400,
            _ => unreachable!(),
        };
        total = total.saturating_add(amount.saturating_mul(unit_seconds));
    }

    Ok(Duration::from_secs(total))
}

/// Format a delay back into `1h 30m` style text for user-facing replies.
pub fn format_delay(delay: Duration) -> String {
    let total = delay.as_secs();
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);

    let mut parts = Vec::new();
    if h > 0 {
        parts.push(format!("{}h", h));
    }
    if m > 0 {
        parts.push(format!("{}m", m));
    }
    if s > 0 || parts.is_empty() {
        parts.push(format!("{}s", s));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_units() {
        assert_eq!(parse_delay("45m").unwrap(), Duration::from_secs(2700));
        assert_eq!(parse_delay("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_delay("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_delay("1d").unwrap(), Duration::from_secs(86400));
    }

    #[test]
    fn test_combined_tokens() {
        assert_eq!(parse_delay("1h 30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_delay("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_delay("1m 30s").unwrap(), Duration::from_secs(90));
    }

    #[test]
    fn test_zero_means_immediate() {
        assert_eq!(parse_delay("0s").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_format_delay() {
        assert_eq!(format_delay(Duration::from_secs(5400)), "1h 30m");
        assert_eq!(format_delay(Duration::from_secs(2700)), "45m");
        assert_eq!(format_delay(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_delay(Duration::ZERO), "0s");
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert!(parse_delay("").is_err());
        assert!(parse_delay("soon").is_err());
        assert!(parse_delay("10").is_err());
        assert!(parse_delay("10w").is_err());
        assert!(parse_delay("1h later").is_err());
    }
}
