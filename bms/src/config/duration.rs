//! Duration strings for `auth.token_ttl`.
//!
//! The accepted form is a signed sequence of decimal numbers, each with an
//! optional fraction and a required unit: `168h`, `1h30m`, `1.5h`, `-90s`,
//! `250ms`. Units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare
//! `0` needs no unit. Whitespace is not allowed anywhere.

use chrono::Duration;

const UNITS: &[(&str, u64)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("\u{b5}s", 1_000),
    ("\u{3bc}s", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

const MAGNITUDE_LIMIT: u64 = 1 << 63;

/// Parse a duration string.
///
/// Returns `None` for empty input, a missing or unknown unit, or a value
/// outside the range of a signed 64-bit nanosecond count.
pub(crate) fn parse_duration(value: &str) -> Option<Duration> {
    let (negative, mut rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    if rest == "0" {
        return Some(Duration::zero());
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        rest = after;

        let mut fraction = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, after) = split_digits(after_dot);
            fraction = digits;
            rest = after;
        }
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, after) = rest.split_at(unit_end);
        rest = after;
        let (_, scale) = UNITS.iter().find(|(name, _)| *name == unit)?;

        let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let segment = whole
            .checked_mul(*scale)?
            .checked_add(fraction_nanos(fraction, *scale))?;
        total = total.checked_add(segment)?;
        if total > MAGNITUDE_LIMIT {
            return None;
        }
    }

    let nanos = match i64::try_from(total) {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) if negative => i64::MIN,
        Err(_) => return None,
    };
    Some(Duration::nanoseconds(nanos))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Digits past what fits in 63 bits are dropped, not rejected.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn fraction_nanos(digits: &str, unit: u64) -> u64 {
    let mut value: u64 = 0;
    let mut scale = 1.0_f64;
    for digit in digits.bytes() {
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
        {
            Some(next) if next < MAGNITUDE_LIMIT => {
                value = next;
                scale *= 10.0;
            }
            _ => break,
        }
    }
    (value as f64 * (unit as f64 / scale)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_units() {
        assert_eq!(parse_duration("168h"), Some(Duration::hours(168)));
        assert_eq!(parse_duration("90s"), Some(Duration::seconds(90)));
        assert_eq!(parse_duration("250ms"), Some(Duration::milliseconds(250)));
        assert_eq!(parse_duration("3us"), Some(Duration::microseconds(3)));
        assert_eq!(parse_duration("3\u{b5}s"), Some(Duration::microseconds(3)));
        assert_eq!(parse_duration("3\u{3bc}s"), Some(Duration::microseconds(3)));
        assert_eq!(parse_duration("7ns"), Some(Duration::nanoseconds(7)));
    }

    #[test]
    fn test_compound_and_fractional() {
        assert_eq!(parse_duration("1h30m"), Some(Duration::minutes(90)));
        assert_eq!(parse_duration("1.5h"), Some(Duration::minutes(90)));
        assert_eq!(parse_duration(".5s"), Some(Duration::milliseconds(500)));
        assert_eq!(parse_duration("1.s"), Some(Duration::seconds(1)));
        assert_eq!(parse_duration("1m0.25s"), Some(Duration::milliseconds(60_250)));
    }

    #[test]
    fn test_signs_and_zero() {
        assert_eq!(parse_duration("-1h"), Some(Duration::hours(-1)));
        assert_eq!(parse_duration("+2m"), Some(Duration::minutes(2)));
        assert_eq!(parse_duration("0"), Some(Duration::zero()));
        assert_eq!(parse_duration("-0"), Some(Duration::zero()));
        assert_eq!(parse_duration("0s"), Some(Duration::zero()));
    }

    #[test]
    fn test_rejected_forms() {
        for raw in [
            "", "-", "soon", "7d", "2weeks", "1 hour", "1h 30m", " 1h", "10", "00", ".", ".h",
            "1.2.3s", "h", "1H", "1_000s",
        ] {
            assert_eq!(parse_duration(raw), None, "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_range_limits() {
        assert_eq!(
            parse_duration("9223372036854775807ns"),
            Some(Duration::nanoseconds(i64::MAX))
        );
        assert_eq!(parse_duration("9223372036854775808ns"), None);
        assert_eq!(
            parse_duration("-9223372036854775808ns"),
            Some(Duration::nanoseconds(i64::MIN))
        );
        assert_eq!(parse_duration("3000000h"), None);
        assert_eq!(parse_duration("99999999999999999999s"), None);
    }
}
