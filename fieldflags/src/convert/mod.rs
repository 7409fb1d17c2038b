//! Text conversion for the primitive flag types.
//!
//! The accepted syntax follows the usual command-line conventions rather than
//! Rust's `FromStr`: booleans take `1`/`t`/`true` style spellings, integers
//! take `0x`, `0o` and `0b` prefixes, and durations use unit suffixes such as
//! `1h30m` or `250ms`.

use std::num::IntErrorKind;
use std::time::Duration;

use thiserror::Error;

use crate::capability::{Capability, Kind};

mod duration;
#[cfg(test)]
mod tests;

pub use duration::{format_duration, parse_duration};

/// Failure converting command-line text into a primitive value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The text is not valid syntax for the target type.
    #[error("parsing {text:?}: invalid syntax")]
    Syntax {
        /// Offending text.
        text: String,
    },

    /// The text is well formed but does not fit the target type.
    #[error("parsing {text:?}: value out of range")]
    Range {
        /// Offending text.
        text: String,
    },

    /// The text is not a valid duration.
    #[error("time: {reason} {text:?}")]
    Duration {
        /// Offending text.
        text: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl ConvertError {
    fn syntax(text: &str) -> Self {
        Self::Syntax {
            text: text.to_owned(),
        }
    }

    fn range(text: &str) -> Self {
        Self::Range {
            text: text.to_owned(),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A type registered through one of the registrar's typed operations.
///
/// Implemented for `bool`, `f64`, `i32`, `i64`, `u32`, `u64`, `String` and
/// [`Duration`]. The trait is sealed; other types participate through
/// [`crate::Value`] or [`crate::TextCodec`].
pub trait Primitive: Clone + Default + PartialEq + sealed::Sealed {
    /// Classification reported for fields of this type.
    const KIND: Kind;

    /// Parses command-line text.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when `text` is not valid for the type.
    fn parse_text(text: &str) -> Result<Self, ConvertError>;

    /// Renders the value the way it would be written on a command line.
    fn render_text(&self) -> String;

    /// Wraps a mutable reference in the matching [`Capability`] variant.
    fn as_capability(&mut self) -> Capability<'_>;
}

impl sealed::Sealed for bool {}

impl Primitive for bool {
    const KIND: Kind = Kind::Bool;

    fn parse_text(text: &str) -> Result<Self, ConvertError> {
        match text {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ConvertError::syntax(text)),
        }
    }

    fn render_text(&self) -> String {
        self.to_string()
    }

    fn as_capability(&mut self) -> Capability<'_> {
        Capability::Bool(self)
    }
}

impl sealed::Sealed for f64 {}

impl Primitive for f64 {
    const KIND: Kind = Kind::Float;

    fn parse_text(text: &str) -> Result<Self, ConvertError> {
        text.parse().map_err(|_| ConvertError::syntax(text))
    }

    fn render_text(&self) -> String {
        self.to_string()
    }

    fn as_capability(&mut self) -> Capability<'_> {
        Capability::Float(self)
    }
}

impl sealed::Sealed for String {}

impl Primitive for String {
    const KIND: Kind = Kind::String;

    fn parse_text(text: &str) -> Result<Self, ConvertError> {
        Ok(text.to_owned())
    }

    fn render_text(&self) -> String {
        self.clone()
    }

    fn as_capability(&mut self) -> Capability<'_> {
        Capability::String(self)
    }
}

impl sealed::Sealed for Duration {}

impl Primitive for Duration {
    const KIND: Kind = Kind::Duration;

    fn parse_text(text: &str) -> Result<Self, ConvertError> {
        parse_duration(text)
    }

    fn render_text(&self) -> String {
        format_duration(*self)
    }

    fn as_capability(&mut self) -> Capability<'_> {
        Capability::Duration(self)
    }
}

macro_rules! integer_primitive {
    ($ty:ty, $kind:ident, $parse:ident) => {
        impl sealed::Sealed for $ty {}

        impl Primitive for $ty {
            const KIND: Kind = Kind::$kind;

            fn parse_text(text: &str) -> Result<Self, ConvertError> {
                <$ty>::try_from($parse(text)?).map_err(|_| ConvertError::range(text))
            }

            fn render_text(&self) -> String {
                self.to_string()
            }

            fn as_capability(&mut self) -> Capability<'_> {
                Capability::$kind(self)
            }
        }
    };
}

integer_primitive!(i32, Int, parse_signed);
integer_primitive!(i64, Int64, parse_signed);
integer_primitive!(u32, Uint, parse_unsigned);
integer_primitive!(u64, Uint64, parse_unsigned);

/// Splits an optional `0x`/`0o`/`0b` prefix from `digits`.
fn split_radix(digits: &str) -> (u32, &str) {
    [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| digits.strip_prefix(prefix).map(|rest| (radix, rest)))
        .unwrap_or((10, digits))
}

/// Parses an unsigned magnitude with an optional radix prefix.
fn parse_magnitude(text: &str, digits: &str) -> Result<u64, ConvertError> {
    let (radix, body) = split_radix(digits);
    if body.is_empty() || body.starts_with(['+', '-']) {
        return Err(ConvertError::syntax(text));
    }
    u64::from_str_radix(body, radix).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ConvertError::range(text),
        _ => ConvertError::syntax(text),
    })
}

fn parse_unsigned(text: &str) -> Result<u64, ConvertError> {
    parse_magnitude(text, text.strip_prefix('+').unwrap_or(text))
}

fn parse_signed(text: &str) -> Result<i64, ConvertError> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let magnitude = i128::from(parse_magnitude(text, digits)?);
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| ConvertError::range(text))
}
