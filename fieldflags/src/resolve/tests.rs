//! Unit tests for default resolution.

use super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use std::cell::Cell;
use std::num::ParseIntError;

#[fixture]
fn env() -> HashMap<String, String> {
    HashMap::from([
        ("TEST_INT".to_owned(), "12345".to_owned()),
        ("STAR".to_owned(), "*".to_owned()),
        ("EMPTY".to_owned(), String::new()),
    ])
}

fn parse_int(text: &str) -> Result<i64, ParseIntError> {
    text.parse()
}

fn identity(text: &str) -> Result<String, std::convert::Infallible> {
    Ok(text.to_owned())
}

#[rstest]
#[case::literal("42", 42, None)]
#[case::empty("", 0, None)]
#[case::from_env("$TEST_INT", 12345, Some("TEST_INT"))]
#[case::missing_env("$NOT_SET_ANYWHERE", 0, Some("NOT_SET_ANYWHERE"))]
#[case::empty_env("$EMPTY", 0, Some("EMPTY"))]
#[case::bare_sigil("$", 0, None)]
#[case::self_reference("*", 7, None)]
fn resolves_integers(
    env: HashMap<String, String>,
    #[case] expr: &str,
    #[case] want: i64,
    #[case] want_env: Option<&str>,
) -> Result<()> {
    let got = resolve(expr, 7, parse_int, &env)?;
    ensure!(got.value == want, "{expr:?}: got {}, want {want}", got.value);
    ensure!(
        got.env.as_deref() == want_env,
        "{expr:?}: env {:?}, want {want_env:?}",
        got.env
    );
    Ok(())
}

#[rstest]
#[case::literal("cork bat", "cork bat")]
#[case::escaped_env("$$TEST_INT", "$TEST_INT")]
#[case::escaped_twice("$$$X", "$$X")]
#[case::from_env("$TEST_INT", "12345")]
#[case::escaped_star("**", "*")]
#[case::self_reference("*", "foo")]
#[case::env_star_is_literal("$STAR", "*")]
#[case::triple_star("***", "***")]
fn resolves_strings(
    env: HashMap<String, String>,
    #[case] expr: &str,
    #[case] want: &str,
) -> Result<()> {
    let got = resolve(expr, "foo".to_owned(), identity, &env)?;
    ensure!(got.value == want, "{expr:?}: got {:?}, want {want:?}", got.value);
    Ok(())
}

#[rstest]
fn escaped_sigil_does_not_read_environment() -> Result<()> {
    let reads = Cell::new(0_u32);
    let env = |_: &str| {
        reads.set(reads.get() + 1);
        Some("leaked".to_owned())
    };
    let got = resolve("$$FOO", String::new(), identity, &env)?;
    ensure!(got.value == "$FOO");
    ensure!(got.env.is_none(), "escaped sigil recorded {:?}", got.env);
    ensure!(reads.get() == 0, "environment consulted {} times", reads.get());
    Ok(())
}

#[rstest]
fn self_reference_skips_parser(env: HashMap<String, String>) -> Result<()> {
    let called = Cell::new(false);
    let got = resolve(
        "*",
        25_i64,
        |text| {
            called.set(true);
            parse_int(text)
        },
        &env,
    )?;
    ensure!(got.value == 25);
    ensure!(!called.get(), "parser invoked for self reference");
    Ok(())
}

#[rstest]
fn escaped_star_reaches_parser(env: HashMap<String, String>) -> Result<()> {
    let seen = Cell::new(None);
    resolve(
        "**",
        (),
        |text| {
            seen.set(Some(text.to_owned()));
            Ok::<(), std::convert::Infallible>(())
        },
        &env,
    )?;
    let text = seen.take().ok_or_else(|| anyhow!("parser not invoked"))?;
    ensure!(text == "*", "parser saw {text:?}");
    Ok(())
}

#[rstest]
fn empty_text_skips_parser(env: HashMap<String, String>) -> Result<()> {
    let got = resolve("$EMPTY", 5_i64, |_| Err::<i64, _>("parser must not run"), &env)
        .map_err(|err| anyhow!(err))?;
    ensure!(got.value == 0, "empty text should produce the zero value");
    Ok(())
}

#[rstest]
fn parse_failure_is_returned(env: HashMap<String, String>) {
    let got = resolve("twelve", 0, parse_int, &env);
    assert!(got.is_err(), "expected parse failure, got {got:?}");
}

#[rstest]
fn env_value_failing_to_parse_is_returned() {
    let env = |name: &str| (name == "BAD").then(|| "x1".to_owned());
    let got = resolve("$BAD", 0, parse_int, &env);
    assert!(got.is_err(), "expected parse failure, got {got:?}");
}
