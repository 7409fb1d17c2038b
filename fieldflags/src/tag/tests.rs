//! Unit tests for the tag grammar.

use super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

#[rstest]
#[case::plain("input,Input file name", "input", None, "Input file name")]
#[case::usage_with_commas("dry-run,Dry run, do not change", "dry-run", None, "Dry run, do not change")]
#[case::inline_default("count,default=1,Iterations", "count", Some("1"), "Iterations")]
#[case::empty_default("count,default=,Iterations", "count", Some(""), "Iterations")]
#[case::env_default("x,default=$TEST_INT,y", "x", Some("$TEST_INT"), "y")]
#[case::self_default("x,default=*,y", "x", Some("*"), "y")]
#[case::quoted_commas("x,default='a, b, c',y", "x", Some("a, b, c"), "y")]
#[case::quoted_quote("x,default='a,''b',y", "x", Some("a,'b"), "y")]
#[case::quoted_only_quotes("x,default='p,'',q',y", "x", Some("p,',q"), "y")]
#[case::quoted_empty("x,default='',y", "x", Some(""), "y")]
#[case::quoted_then_commas("x,default='ok go',str, more", "x", Some("ok go"), "str, more")]
#[case::empty_usage("x,", "x", None, "")]
#[case::default_empty_usage("x,default=3,", "x", Some("3"), "")]
fn parses_well_formed_tags(
    #[case] text: &str,
    #[case] name: &str,
    #[case] default: Option<&str>,
    #[case] usage: &str,
) -> Result<()> {
    let tag = parse_tag(text).map_err(|err| anyhow!("parse {text:?}: {err}"))?;
    ensure!(tag.name == name, "name: got {:?}, want {name:?}", tag.name);
    ensure!(
        tag.default.as_deref() == default,
        "default: got {:?}, want {default:?}",
        tag.default
    );
    ensure!(tag.usage == usage, "usage: got {:?}, want {usage:?}", tag.usage);
    Ok(())
}

#[rstest]
#[case::missing_usage("nousage", TagError::InvalidFormat("nousage".to_owned()))]
#[case::empty("", TagError::InvalidFormat(String::new()))]
#[case::empty_name(",empty name", TagError::EmptyName)]
#[case::empty_name_with_default(",default=1,usage", TagError::EmptyName)]
#[case::unterminated_quote("x,default='abc,y", TagError::InvalidDefault("'abc,y".to_owned()))]
#[case::default_without_usage("x,default=5", TagError::InvalidDefault("5".to_owned()))]
#[case::stray_quote("x,default=a'b,y", TagError::InvalidDefault("a'b,y".to_owned()))]
#[case::text_after_quote("x,default='a'b,y", TagError::InvalidDefault("'a'b,y".to_owned()))]
fn rejects_malformed_tags(#[case] text: &str, #[case] expected: TagError) -> Result<()> {
    match parse_tag(text) {
        Ok(tag) => Err(anyhow!("parse {text:?}: got {tag:?}, want error")),
        Err(err) => {
            ensure!(err == expected, "parse {text:?}: got {err:?}, want {expected:?}");
            Ok(())
        }
    }
}

#[rstest]
fn plain_defaults_round_trip() -> Result<()> {
    for value in ["0", "0.25", "cork bat", "$HOME", "**", "µs"] {
        let tag = parse_tag(&format!("name,default={value},usage"))?;
        ensure!(tag.default.as_deref() == Some(value), "default {value:?} lost");
    }
    Ok(())
}

#[rstest]
fn quoted_defaults_round_trip() -> Result<()> {
    for value in ["a,b", "it's", "','", "''", ",,"] {
        let quoted = format!("'{}'", value.replace('\'', "''"));
        let tag = parse_tag(&format!("name,default={quoted},usage"))?;
        ensure!(
            tag.default.as_deref() == Some(value),
            "quoted default {quoted:?}: got {:?}",
            tag.default
        );
        ensure!(tag.usage == "usage", "usage lost for {quoted:?}");
    }
    Ok(())
}

#[rstest]
fn side_channel_default_fills_missing_default() -> Result<()> {
    let tag = parse_tag("x,y")?.apply_default_tag(Some("a, b"))?;
    ensure!(tag.default.as_deref() == Some("a, b"));
    Ok(())
}

#[rstest]
fn absent_side_channel_keeps_inline_default() -> Result<()> {
    let tag = parse_tag("x,default=7,y")?.apply_default_tag(None)?;
    ensure!(tag.default.as_deref() == Some("7"));
    Ok(())
}

#[rstest]
#[case::identical("x,default=x,y", "x")]
#[case::different("x,default=1,y", "2")]
#[case::empty_inline("x,default=,y", "2")]
fn side_channel_conflicts_with_inline_default(#[case] text: &str, #[case] side: &str) -> Result<()> {
    let result = parse_tag(text)?.apply_default_tag(Some(side));
    ensure!(
        result == Err(TagError::ConflictingDefaults),
        "expected conflict, got {result:?}"
    );
    Ok(())
}
