//! Conversions between UPnP time strings and seconds.
//!
//! AVTransport reports durations and positions as `H+:MM:SS[.F+]`
//! (e.g. `0:03:45`, `01:02:03.500`). Renderers without a value send
//! `NOT_IMPLEMENTED` or an empty string.

/// Formats a duration in seconds as HH:MM:SS.
///
/// # Examples
/// ```
/// # use pmosoap::time_utils::format_hhmmss;
/// assert_eq!(format_hhmmss(0), "00:00:00");
/// assert_eq!(format_hhmmss(61), "00:01:01");
/// assert_eq!(format_hhmmss(3661), "01:01:01");
/// ```
pub fn format_hhmmss(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Parses an AVTransport time value to whole seconds.
///
/// Accepts `H+:MM:SS`, `MM:SS` and `SS`, with an optional fractional part on
/// the seconds (dropped). Returns `None` for `NOT_IMPLEMENTED`, empty values,
/// or anything that does not parse.
///
/// # Examples
/// ```
/// # use pmosoap::time_utils::parse_upnp_time;
/// assert_eq!(parse_upnp_time("0:03:45"), Some(225));
/// assert_eq!(parse_upnp_time("01:02:03.500"), Some(3723));
/// assert_eq!(parse_upnp_time("NOT_IMPLEMENTED"), None);
/// ```
pub fn parse_upnp_time(input: &str) -> Option<u32> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("NOT_IMPLEMENTED") {
        return None;
    }

    // fraction: ".F+" or "F0/F1"
    let whole = input.split('.').next().unwrap_or(input);

    let parts: Vec<&str> = whole.split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    let mut total = 0u32;
    for part in parts {
        let value = part.trim_start_matches('+').parse::<u32>().ok()?;
        total = total.checked_mul(60)?.checked_add(value)?;
    }

    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hhmmss() {
        assert_eq!(format_hhmmss(0), "00:00:00");
        assert_eq!(format_hhmmss(59), "00:00:59");
        assert_eq!(format_hhmmss(3600), "01:00:00");
        assert_eq!(format_hhmmss(86399), "23:59:59");
        assert_eq!(format_hhmmss(360000), "100:00:00");
    }

    #[test]
    fn test_parse_upnp_time() {
        assert_eq!(parse_upnp_time("01:02:03"), Some(3723));
        assert_eq!(parse_upnp_time("0:00:00"), Some(0));
        assert_eq!(parse_upnp_time("02:03"), Some(123));
        assert_eq!(parse_upnp_time("42"), Some(42));
        assert_eq!(parse_upnp_time("00:04:10.250"), Some(250));
        assert_eq!(parse_upnp_time(" 0:01:00 "), Some(60));

        assert_eq!(parse_upnp_time(""), None);
        assert_eq!(parse_upnp_time("not_implemented"), None);
        assert_eq!(parse_upnp_time("1:2:3:4"), None);
        assert_eq!(parse_upnp_time("abc"), None);
    }
}
