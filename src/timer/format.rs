//! Duration formatting and parsing in `hh:mm:ss` form

use crate::error::DurationParseError;

/// Format seconds as "HH:MM:SS"
pub fn format_hms(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Parse `ss`, `mm:ss` or `hh:mm:ss` into seconds.
///
/// Components are plain non-negative integers and are not range checked, so
/// `"90"` and `"1:30"` both mean ninety seconds.
pub fn parse_hms(input: &str) -> Result<u64, DurationParseError> {
    let err = || DurationParseError {
        input: input.to_string(),
    };

    let parts = input
        .trim()
        .split(':')
        .map(|part| part.trim().parse::<u64>().map_err(|_| err()))
        .collect::<Result<Vec<_>, _>>()?;

    let total = match parts.as_slice() {
        [s] => Some(*s),
        [m, s] => m.checked_mul(60).and_then(|m| m.checked_add(*s)),
        [h, m, s] => h
            .checked_mul(3600)
            .and_then(|h| m.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(*s)),
        _ => None,
    };

    total.ok_or_else(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(61), "00:01:01");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(359_999), "99:59:59");
        assert_eq!(format_hms(360_000), "100:00:00");
    }

    #[test]
    fn test_parse_plain_seconds() {
        assert_eq!(parse_hms("45"), Ok(45));
        assert_eq!(parse_hms(" 90 "), Ok(90));
    }

    #[test]
    fn test_parse_minutes_and_hours() {
        assert_eq!(parse_hms("1:30"), Ok(90));
        assert_eq!(parse_hms("01:00:05"), Ok(3605));
        assert_eq!(parse_hms("00:00:00"), Ok(0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_hms("").is_err());
        assert!(parse_hms("abc").is_err());
        assert!(parse_hms("1:2:3:4").is_err());
        assert!(parse_hms("-5").is_err());
        assert!(parse_hms("1::2").is_err());
    }

    #[test]
    fn test_parse_reports_input() {
        let err = parse_hms("x:10").unwrap_err();
        assert_eq!(err.input, "x:10");
        assert!(err.to_string().contains("x:10"));
    }
}
