//! Text codec for tri-state bridge tunables.
//!
//! Every tunable is either unset or holds a value. Unset converts to and
//! from the empty string; a non-empty string that fails to parse in full
//! is a `ParseError`, never silently treated as absent. Durations are
//! exchanged as decimal seconds but stored as integer hundredths of a
//! second, which is the granularity the kernel bridge interface uses.

use netmgr_common::{CfgError, CfgResult};

/// Parses an unsigned count. Empty input means unset, not an error.
///
/// Accepts decimal, `0x`/`0X`-prefixed hex, and leading-zero octal.
/// The whole string must be consumed.
pub fn parse_count(text: &str) -> CfgResult<Option<u32>> {
    if text.is_empty() {
        return Ok(None);
    }

    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if text.len() > 1 && text.starts_with('0') {
        u32::from_str_radix(&text[1..], 8)
    } else {
        text.parse::<u32>()
    };

    match parsed {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(CfgError::parse_error("count", text)),
    }
}

/// Formats an unsigned count. Unset becomes the empty string.
pub fn format_count(value: Option<u32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// Parses a duration given as decimal seconds (fractions allowed) into
/// hundredths of a second. Empty input means unset, not an error.
pub fn parse_duration(text: &str) -> CfgResult<Option<u32>> {
    if text.is_empty() {
        return Ok(None);
    }

    let seconds: f64 = text
        .parse()
        .map_err(|_| CfgError::parse_error("duration", text))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(CfgError::parse_error("duration", text));
    }

    Ok(Some((seconds * 100.0).round() as u32))
}

/// Formats a duration held as hundredths of a second into seconds with
/// exactly two decimal places. Unset becomes the empty string.
pub fn format_duration(value: Option<u32>) -> String {
    match value {
        Some(v) => format!("{:.2}", f64::from(v) / 100.0),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_count_empty_is_unset() {
        assert_eq!(parse_count("").unwrap(), None);
    }

    #[test]
    fn test_parse_count_decimal() {
        assert_eq!(parse_count("0").unwrap(), Some(0));
        assert_eq!(parse_count("32768").unwrap(), Some(32768));
    }

    #[test]
    fn test_parse_count_hex_and_octal() {
        assert_eq!(parse_count("0x10").unwrap(), Some(16));
        assert_eq!(parse_count("0X8000").unwrap(), Some(0x8000));
        assert_eq!(parse_count("010").unwrap(), Some(8));
    }

    #[test]
    fn test_parse_count_rejects_garbage() {
        assert!(parse_count("abc").is_err());
        assert!(parse_count("12x").is_err());
        assert!(parse_count("0x").is_err());
        assert!(parse_count("08").is_err());
        assert!(parse_count("-1").is_err());
    }

    #[test]
    fn test_count_round_trip_value_equality() {
        // 0x20 and 32 are different spellings of the same value
        for (input, canonical) in [("32", "32"), ("0x20", "32"), ("040", "32")] {
            let value = parse_count(input).unwrap();
            assert_eq!(format_count(value), canonical);
        }
    }

    #[test]
    fn test_format_count_unset() {
        assert_eq!(format_count(None), "");
        assert_eq!(format_count(Some(15)), "15");
    }

    #[test]
    fn test_parse_duration_empty_is_unset() {
        assert_eq!(parse_duration("").unwrap(), None);
        assert_eq!(format_duration(None), "");
    }

    #[test]
    fn test_duration_round_trip() {
        let value = parse_duration("1.50").unwrap();
        assert_eq!(value, Some(150));
        assert_eq!(format_duration(value), "1.50");
    }

    #[test]
    fn test_parse_duration_whole_seconds() {
        assert_eq!(parse_duration("15").unwrap(), Some(1500));
        assert_eq!(format_duration(Some(1500)), "15.00");
    }

    #[test]
    fn test_parse_duration_rounds_to_centiseconds() {
        assert_eq!(parse_duration("0.999").unwrap(), Some(100));
        assert_eq!(parse_duration("0.004").unwrap(), Some(0));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("2.0s").is_err());
        assert!(parse_duration("maybe").is_err());
        assert!(parse_duration("-1").is_err());
        assert!(parse_duration("inf").is_err());
    }
}
