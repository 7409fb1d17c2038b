//! Parser for the `name[,default=V],usage` tag grammar.
//!
//! A tag names the flag, optionally supplies a default and always carries
//! usage text:
//!
//! ```text
//! count,Number of iterations
//! count,default=1,Number of iterations
//! tags,default='a, b',Tags to apply
//! quote,default='it''s',Contains a literal quote
//! ```
//!
//! Plain defaults may not contain commas or single quotes. Quoted defaults
//! may contain commas, and a doubled quote (`''`) stands for one literal
//! quote.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TagError;

#[cfg(test)]
mod tests;

/// Anchored default literal: a quoted run (with `''` escapes) or a plain run
/// free of commas and quotes, followed by the usage text.
static DEFAULT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^('(?:[^']|'')*'|[^,']*),(.*)$").ok());

const DEFAULT_PREFIX: &str = "default=";

/// The components of a parsed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagExpr {
    /// Flag name, never empty.
    pub name: String,
    /// Raw default expression, before environment or self-reference
    /// resolution. `None` when the tag supplies no default.
    pub default: Option<String>,
    /// Usage text, possibly empty.
    pub usage: String,
}

impl TagExpr {
    /// Merges a default supplied through the side-channel `#[flag_default]`
    /// attribute.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::ConflictingDefaults`] when the tag already carries
    /// an inline default, whether or not the two texts agree.
    pub fn apply_default_tag(mut self, side_channel: Option<&str>) -> Result<Self, TagError> {
        let Some(text) = side_channel else {
            return Ok(self);
        };
        if self.default.is_some() {
            return Err(TagError::ConflictingDefaults);
        }
        self.default = Some(text.to_owned());
        Ok(self)
    }
}

/// Splits tag text into name, default expression and usage.
///
/// # Errors
///
/// - [`TagError::InvalidFormat`] when no comma separates name and usage.
/// - [`TagError::InvalidDefault`] when a `default=` literal is unterminated
///   or not followed by a comma and usage text.
/// - [`TagError::EmptyName`] when the name is empty.
///
/// # Examples
///
/// ```
/// use fieldflags::parse_tag;
///
/// let tag = parse_tag("x,default='a,''b',y").expect("well-formed tag");
/// assert_eq!(tag.name, "x");
/// assert_eq!(tag.default.as_deref(), Some("a,'b"));
/// assert_eq!(tag.usage, "y");
/// ```
pub fn parse_tag(text: &str) -> Result<TagExpr, TagError> {
    let Some((name, rest)) = text.split_once(',') else {
        return Err(TagError::InvalidFormat(text.to_owned()));
    };

    let (default, usage) = match rest.strip_prefix(DEFAULT_PREFIX) {
        Some(literal) => {
            let (value, usage) = split_default(literal)?;
            (Some(value), usage)
        }
        None => (None, rest.to_owned()),
    };

    if name.is_empty() {
        return Err(TagError::EmptyName);
    }
    Ok(TagExpr {
        name: name.to_owned(),
        default,
        usage,
    })
}

/// Separates a default literal from the usage text that follows it,
/// unquoting the literal when needed.
fn split_default(text: &str) -> Result<(String, String), TagError> {
    let invalid = || TagError::InvalidDefault(text.to_owned());
    let re = DEFAULT_RE.as_ref().ok_or_else(invalid)?;
    let caps = re.captures(text).ok_or_else(invalid)?;
    let (Some(literal), Some(usage)) = (caps.get(1), caps.get(2)) else {
        return Err(invalid());
    };
    Ok((unquote(literal.as_str()), usage.as_str().to_owned()))
}

/// Strips `'quotes'` from a quoted literal and collapses `''` to `'`.
/// Plain literals are returned unchanged.
fn unquote(literal: &str) -> String {
    literal
        .strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .map_or_else(|| literal.to_owned(), |inner| inner.replace("''", "'"))
}
