//! Time parsing and formatting utilities

use std::time::Duration;

const NANOS_PER_SEC: u32 = 1_000_000_000;
const FRACTION_DIGITS: usize = 9;

/// Parse a decimal number of seconds (`"12.345678"`) into an exact `Duration`.
///
/// The text is split on the decimal point and both halves are read as
/// integers, so the fractional part keeps full nanosecond precision. Digits
/// past the ninth are truncated. Surrounding whitespace (the trailing newline
/// ffprobe prints) is ignored; anything else is rejected.
pub fn parse_seconds(text: &str) -> Result<Duration, String> {
    let value = text.trim();
    if value.is_empty() {
        return Err("empty duration".to_string());
    }
    if value.contains(char::is_whitespace) {
        return Err(format!("expected a single value, got {:?}", value));
    }

    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("not a non-negative decimal number: {:?}", value));
    }
    let secs: u64 = whole
        .parse()
        .map_err(|e| format!("seconds out of range in {:?}: {}", value, e))?;

    let nanos = match fraction {
        None => 0,
        Some(digits) => {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("malformed fractional part in {:?}", value));
            }
            let kept = &digits[..digits.len().min(FRACTION_DIGITS)];
            let scale = 10u32.pow((FRACTION_DIGITS - kept.len()) as u32);
            // At most nine digits, so this fits in u32
            kept.parse::<u32>()
                .map_err(|e| format!("malformed fractional part in {:?}: {}", value, e))?
                * scale
        }
    };
    debug_assert!(nanos < NANOS_PER_SEC);

    Ok(Duration::new(secs, nanos))
}

/// Format a duration as `HH:MM:SS.mmm`
pub fn format_timestamp(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    let millis = duration.subsec_millis();

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ffprobe_output() {
        assert_eq!(
            parse_seconds("10.500000\n").unwrap(),
            Duration::from_millis(10_500)
        );
        assert_eq!(parse_seconds("20\n").unwrap(), Duration::from_secs(20));
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        for text in ["10.5", " 10.5\n", "10.5\r\n"] {
            assert_eq!(parse_seconds(text).unwrap(), Duration::from_millis(10_500));
        }
    }

    #[test]
    fn test_parse_keeps_sub_millisecond_precision() {
        assert_eq!(
            parse_seconds("0.000001").unwrap(),
            Duration::from_micros(1)
        );
        assert_eq!(
            parse_seconds("3.1234567891234").unwrap(),
            Duration::new(3, 123_456_789)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "\n", "N/A\n", "-1.5", "1.2.3", "abc", "10.", ".5", "1.5\n2.5\n", "1e3"] {
            assert!(parse_seconds(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(Duration::ZERO), "00:00:00.000");
        assert_eq!(
            format_timestamp(Duration::from_millis(3_723_456)),
            "01:02:03.456"
        );
        assert_eq!(
            format_timestamp(Duration::from_millis(35_750)),
            "00:00:35.750"
        );
    }
}
