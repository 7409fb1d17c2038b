//! Unit-suffixed duration syntax: `300ms`, `1.5h`, `2h45m`.
//!
//! Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. Negative
//! durations are rejected because [`Duration`] is unsigned.

use std::time::Duration;

use super::ConvertError;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Fraction digits beyond this are ignored; they are below nanosecond
/// resolution for every unit.
const MAX_FRACTION_DIGITS: usize = 18;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Parses a duration such as `1h30m` or `0.25s`.
///
/// A bare `0` is accepted without a unit.
///
/// # Errors
///
/// Returns [`ConvertError::Duration`] for malformed input, unknown units,
/// negative values or values that overflow 64-bit nanoseconds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fieldflags::parse_duration;
///
/// assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
/// assert_eq!(parse_duration("1.5ms"), Ok(Duration::from_micros(1_500)));
/// ```
pub fn parse_duration(text: &str) -> Result<Duration, ConvertError> {
    let fail = |reason| ConvertError::Duration {
        text: text.to_owned(),
        reason,
    };

    let mut rest = text.strip_prefix('+').unwrap_or(text);
    if rest.starts_with('-') {
        return Err(fail("negative duration"));
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(fail("invalid duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = take_digits(rest);
        let (fraction, after_fraction) = match after_whole.strip_prefix('.') {
            Some(tail) => take_digits(tail),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(fail("invalid duration"));
        }

        let unit_end = after_fraction
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_fraction.len());
        let (unit, tail) = after_fraction.split_at(unit_end);
        if unit.is_empty() {
            return Err(fail("missing unit in duration"));
        }
        let scale = unit_nanos(unit).ok_or_else(|| fail("unknown unit in duration"))?;

        let component = component_nanos(whole, fraction, scale).ok_or_else(|| fail("invalid duration"))?;
        total = total
            .checked_add(component)
            .ok_or_else(|| fail("invalid duration"))?;
        rest = tail;
    }

    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| fail("invalid duration"))
}

/// Splits the leading ASCII digits from `text`.
fn take_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

/// Nanoseconds for `whole.fraction` units of `scale` nanoseconds, or `None`
/// on overflow.
fn component_nanos(whole: &str, fraction: &str, scale: u128) -> Option<u128> {
    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().ok()?
    };
    let mut nanos = whole_value.checked_mul(scale)?;

    let digits: String = fraction.chars().take(MAX_FRACTION_DIGITS).collect();
    if !digits.is_empty() {
        let numerator = digits.parse::<u128>().ok()?;
        let exponent = u32::try_from(digits.len()).ok()?;
        let denominator = 10_u128.checked_pow(exponent)?;
        let part = numerator.checked_mul(scale)?.checked_div(denominator)?;
        nanos = nanos.checked_add(part)?;
    }
    Some(nanos)
}

/// Renders a duration in the form accepted by [`parse_duration`], for example
/// `1h0m0s`, `1m30s`, `1.5s`, `250ms` or `0s`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fieldflags::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(5_400)), "1h30m0s");
/// assert_eq!(format_duration(Duration::from_millis(1_500)), "1.5s");
/// assert_eq!(format_duration(Duration::ZERO), "0s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let subsec = u128::from(duration.subsec_nanos());

    if secs == 0 {
        return match subsec {
            0 => "0s".to_owned(),
            n if n < NANOS_PER_MICRO => format!("{n}ns"),
            n if n < NANOS_PER_MILLI => with_fraction(n, NANOS_PER_MICRO, 3, "\u{b5}s"),
            n => with_fraction(n, NANOS_PER_MILLI, 6, "ms"),
        };
    }

    let hours = secs.div_euclid(3_600);
    let minutes = secs.rem_euclid(3_600).div_euclid(60);
    let seconds = u128::from(secs.rem_euclid(60)) * NANOS_PER_SEC + subsec;
    let seconds_text = with_fraction(seconds, NANOS_PER_SEC, 9, "s");
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds_text}")
    } else if minutes > 0 {
        format!("{minutes}m{seconds_text}")
    } else {
        seconds_text
    }
}

/// Formats `nanos / unit` with up to `width` fraction digits, trailing zeros
/// trimmed.
fn with_fraction(nanos: u128, unit: u128, width: usize, suffix: &str) -> String {
    let whole = nanos.div_euclid(unit);
    let fraction = nanos.rem_euclid(unit);
    if fraction == 0 {
        return format!("{whole}{suffix}");
    }
    let digits = format!("{fraction:0width$}");
    format!("{whole}.{}{suffix}", digits.trim_end_matches('0'))
}
