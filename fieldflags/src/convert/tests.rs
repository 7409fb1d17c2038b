//! Unit tests for primitive text conversion.

use super::*;
use rstest::rstest;

#[rstest]
#[case("1", true)]
#[case("t", true)]
#[case("TRUE", true)]
#[case("True", true)]
#[case("0", false)]
#[case("F", false)]
#[case("false", false)]
fn parses_booleans(#[case] text: &str, #[case] want: bool) {
    assert_eq!(bool::parse_text(text), Ok(want));
}

#[rstest]
#[case("yes")]
#[case("tRuE")]
#[case("")]
fn rejects_malformed_booleans(#[case] text: &str) {
    assert_eq!(bool::parse_text(text), Err(ConvertError::syntax(text)));
}

#[rstest]
#[case("13", 13)]
#[case("+13", 13)]
#[case("-13", -13)]
#[case("0x1f", 31)]
#[case("-0b101", -5)]
#[case("0o17", 15)]
#[case("010", 10)]
#[case("-9223372036854775808", i64::MIN)]
fn parses_signed_integers(#[case] text: &str, #[case] want: i64) {
    assert_eq!(i64::parse_text(text), Ok(want));
}

#[rstest]
#[case::overflow_i32("2147483648", ConvertError::range("2147483648"))]
#[case::not_a_number("thirteen", ConvertError::syntax("thirteen"))]
#[case::double_sign("--1", ConvertError::syntax("--1"))]
#[case::bare_prefix("0x", ConvertError::syntax("0x"))]
fn rejects_bad_i32(#[case] text: &str, #[case] want: ConvertError) {
    assert_eq!(i32::parse_text(text), Err(want));
}

#[rstest]
fn rejects_signed_overflow() {
    assert_eq!(
        i64::parse_text("9223372036854775808"),
        Err(ConvertError::range("9223372036854775808"))
    );
}

#[rstest]
#[case("99", 99)]
#[case("+7", 7)]
#[case("0xff", 255)]
#[case("18446744073709551615", u64::MAX)]
fn parses_unsigned_integers(#[case] text: &str, #[case] want: u64) {
    assert_eq!(u64::parse_text(text), Ok(want));
}

#[rstest]
#[case("-1", ConvertError::syntax("-1"))]
#[case("4294967296", ConvertError::range("4294967296"))]
fn rejects_bad_u32(#[case] text: &str, #[case] want: ConvertError) {
    assert_eq!(u32::parse_text(text), Err(want));
}

#[rstest]
fn parses_floats() {
    assert_eq!(f64::parse_text("0.25"), Ok(0.25));
    assert_eq!(f64::parse_text("-1e3"), Ok(-1000.0));
    assert!(f64::parse_text("quarter").is_err());
}

#[rstest]
#[case("0", Duration::ZERO)]
#[case("0s", Duration::ZERO)]
#[case("300ms", Duration::from_millis(300))]
#[case("1.5h", Duration::from_secs(5_400))]
#[case("2h45m", Duration::from_secs(9_900))]
#[case("1m30s", Duration::from_secs(90))]
#[case(".5s", Duration::from_millis(500))]
#[case("+10s", Duration::from_secs(10))]
#[case("1us", Duration::from_micros(1))]
#[case("1\u{b5}s", Duration::from_micros(1))]
#[case("1\u{3bc}s", Duration::from_micros(1))]
#[case("7ns", Duration::from_nanos(7))]
#[case("1.000000001s", Duration::from_nanos(1_000_000_001))]
fn parses_durations(#[case] text: &str, #[case] want: Duration) {
    assert_eq!(parse_duration(text), Ok(want));
}

#[rstest]
#[case("", "invalid duration")]
#[case("5", "missing unit in duration")]
#[case("5 s", "unknown unit in duration")]
#[case("3d", "unknown unit in duration")]
#[case("-1s", "negative duration")]
#[case(".s", "invalid duration")]
#[case("1h.", "invalid duration")]
#[case("99999999999999999999h", "invalid duration")]
fn rejects_malformed_durations(#[case] text: &str, #[case] reason: &'static str) {
    assert_eq!(
        parse_duration(text),
        Err(ConvertError::Duration {
            text: text.to_owned(),
            reason,
        })
    );
}

#[rstest]
#[case(Duration::ZERO, "0s")]
#[case(Duration::from_nanos(7), "7ns")]
#[case(Duration::from_nanos(1_500), "1.5\u{b5}s")]
#[case(Duration::from_millis(250), "250ms")]
#[case(Duration::from_millis(1_500), "1.5s")]
#[case(Duration::from_secs(90), "1m30s")]
#[case(Duration::from_secs(3_600), "1h0m0s")]
#[case(Duration::from_nanos(3_661_000_000_001), "1h1m1.000000001s")]
fn formats_durations(#[case] duration: Duration, #[case] want: &str) {
    assert_eq!(format_duration(duration), want);
}

#[rstest]
fn formatted_durations_parse_back() {
    for duration in [
        Duration::from_nanos(12),
        Duration::from_micros(1_234),
        Duration::from_secs(86_400),
        Duration::from_millis(61_001),
    ] {
        assert_eq!(parse_duration(&format_duration(duration)), Ok(duration));
    }
}
