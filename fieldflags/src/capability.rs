//! Classification of field types into flag capabilities.
//!
//! Every field is classified into exactly one [`Capability`]. Types that
//! implement [`Value`] win over types that implement [`TextCodec`], which in
//! turn win over the built-in primitives; anything else is
//! [`Capability::Unsupported`]. The derive macro performs the classification
//! at compile time through the ranked probe traits in [`probe`], so
//! unsupported types surface as a [`crate::FlagError::UnsupportedType`] from
//! [`crate::check`] rather than as a build failure.

use std::fmt;
use std::time::Duration;

use crate::error::BoxError;

/// A type that parses command-line text into itself and renders itself back.
///
/// `set` is called once per occurrence of the flag, and once during
/// [`crate::check`] when the tag supplies a non-empty default.
///
/// ```
/// use std::fmt;
/// use fieldflags::{BoxError, Value};
///
/// #[derive(Default)]
/// struct Tags(Vec<String>);
///
/// impl fmt::Display for Tags {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(&self.0.join(","))
///     }
/// }
///
/// impl Value for Tags {
///     fn set(&mut self, text: &str) -> Result<(), BoxError> {
///         self.0.extend(text.split(',').map(str::to_owned));
///         Ok(())
///     }
/// }
/// ```
pub trait Value: fmt::Display {
    /// Updates the value from command-line text.
    ///
    /// # Errors
    ///
    /// Returns an error when `text` is not acceptable.
    fn set(&mut self, text: &str) -> Result<(), BoxError>;
}

/// A type with separate render-to-text and parse-from-text operations.
///
/// Flags of this type are set by [`TextCodec::unmarshal_text`]; their current
/// state, rendered by [`TextCodec::marshal_text`], is shown as the default.
pub trait TextCodec {
    /// Renders the current state as text.
    ///
    /// # Errors
    ///
    /// Returns an error when the state cannot be represented as text.
    fn marshal_text(&self) -> Result<String, BoxError>;

    /// Replaces the current state with the one described by `text`.
    ///
    /// # Errors
    ///
    /// Returns an error when `text` is not acceptable.
    fn unmarshal_text(&mut self, text: &str) -> Result<(), BoxError>;
}

/// Kind of flag a field was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `bool`
    Bool,
    /// `f64`
    Float,
    /// `i32`
    Int,
    /// `i64`
    Int64,
    /// `u32`
    Uint,
    /// `u64`
    Uint64,
    /// `String`
    String,
    /// [`std::time::Duration`]
    Duration,
    /// A [`Value`] implementation.
    Value,
    /// A [`TextCodec`] implementation.
    Text,
}

impl Kind {
    /// Short placeholder used for the flag's value in help output.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Int | Self::Int64 => "int",
            Self::Uint | Self::Uint64 => "uint",
            Self::String => "string",
            Self::Duration => "duration",
            Self::Value | Self::Text => "value",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hint())
    }
}

/// A field's mutable storage, tagged with how it can be bound as a flag.
pub enum Capability<'a> {
    /// Settable value.
    Value(&'a mut dyn Value),
    /// Text codec.
    Text(&'a mut dyn TextCodec),
    /// Boolean.
    Bool(&'a mut bool),
    /// Floating point.
    Float(&'a mut f64),
    /// 32-bit signed integer.
    Int(&'a mut i32),
    /// 64-bit signed integer.
    Int64(&'a mut i64),
    /// 32-bit unsigned integer.
    Uint(&'a mut u32),
    /// 64-bit unsigned integer.
    Uint64(&'a mut u64),
    /// String.
    String(&'a mut String),
    /// Duration.
    Duration(&'a mut Duration),
    /// No flag representation; carries the type name for diagnostics.
    Unsupported(&'static str),
}

impl Capability<'_> {
    /// The classification, or `None` for unsupported types.
    #[must_use]
    pub const fn kind(&self) -> Option<Kind> {
        match self {
            Self::Value(_) => Some(Kind::Value),
            Self::Text(_) => Some(Kind::Text),
            Self::Bool(_) => Some(Kind::Bool),
            Self::Float(_) => Some(Kind::Float),
            Self::Int(_) => Some(Kind::Int),
            Self::Int64(_) => Some(Kind::Int64),
            Self::Uint(_) => Some(Kind::Uint),
            Self::Uint64(_) => Some(Kind::Uint64),
            Self::String(_) => Some(Kind::String),
            Self::Duration(_) => Some(Kind::Duration),
            Self::Unsupported(_) => None,
        }
    }
}

impl fmt::Debug for Capability<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(type_name) => f.debug_tuple("Unsupported").field(type_name).finish(),
            other => f
                .debug_tuple("Capability")
                .field(&other.kind())
                .finish(),
        }
    }
}

/// Ranked traits used by `#[derive(Flags)]` to classify a field.
///
/// Generated code calls `(&&&&Probe::new(&mut field)).capability()`. Method
/// resolution tries the receiver with the most references first, so the
/// impl on `&&&&Probe` (settable value) is preferred over `&&&Probe` (text
/// codec), then `&&Probe` (primitive), then `&Probe` (unsupported).
pub mod probe {
    use std::cell::Cell;

    use super::{Capability, TextCodec, Value};
    use crate::convert::Primitive;

    /// Holds the field reference until a probe trait claims it.
    pub struct Probe<'a, T: ?Sized>(Cell<Option<&'a mut T>>);

    impl<'a, T: ?Sized> Probe<'a, T> {
        /// Wraps a field reference.
        pub const fn new(target: &'a mut T) -> Self {
            Self(Cell::new(Some(target)))
        }

        fn take(&self) -> Option<&'a mut T> {
            self.0.take()
        }
    }

    fn unsupported<'a, T: ?Sized>() -> Capability<'a> {
        Capability::Unsupported(std::any::type_name::<T>())
    }

    /// First rank: [`Value`] implementations.
    pub trait ValueProbe<'a> {
        /// Claims the field.
        fn capability(self) -> Capability<'a>;
    }

    impl<'a, T: Value + 'a> ValueProbe<'a> for &&&&Probe<'a, T> {
        fn capability(self) -> Capability<'a> {
            self.take()
                .map_or_else(unsupported::<T>, |target| Capability::Value(target))
        }
    }

    /// Second rank: [`TextCodec`] implementations.
    pub trait TextProbe<'a> {
        /// Claims the field.
        fn capability(self) -> Capability<'a>;
    }

    impl<'a, T: TextCodec + 'a> TextProbe<'a> for &&&Probe<'a, T> {
        fn capability(self) -> Capability<'a> {
            self.take()
                .map_or_else(unsupported::<T>, |target| Capability::Text(target))
        }
    }

    /// Third rank: the built-in primitives.
    pub trait PrimitiveProbe<'a> {
        /// Claims the field.
        fn capability(self) -> Capability<'a>;
    }

    impl<'a, T: Primitive + 'a> PrimitiveProbe<'a> for &&Probe<'a, T> {
        fn capability(self) -> Capability<'a> {
            self.take()
                .map_or_else(unsupported::<T>, T::as_capability)
        }
    }

    /// Fallback rank: everything else.
    pub trait UnsupportedProbe<'a> {
        /// Reports the field as unsupported.
        fn capability(self) -> Capability<'a>;
    }

    impl<'a, T: ?Sized + 'a> UnsupportedProbe<'a> for &Probe<'a, T> {
        fn capability(self) -> Capability<'a> {
            unsupported::<T>()
        }
    }
}

#[cfg(test)]
mod tests {
    //! Probe ranking checks.

    use super::probe::{PrimitiveProbe as _, Probe, TextProbe as _, UnsupportedProbe as _, ValueProbe as _};
    use super::*;
    use rstest::rstest;

    #[derive(Default)]
    struct Both(String);

    impl fmt::Display for Both {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl Value for Both {
        fn set(&mut self, text: &str) -> Result<(), BoxError> {
            self.0 = text.to_owned();
            Ok(())
        }
    }

    impl TextCodec for Both {
        fn marshal_text(&self) -> Result<String, BoxError> {
            Ok(self.0.clone())
        }

        fn unmarshal_text(&mut self, text: &str) -> Result<(), BoxError> {
            self.0 = text.to_owned();
            Ok(())
        }
    }

    #[derive(Default)]
    struct TextOnly(String);

    impl TextCodec for TextOnly {
        fn marshal_text(&self) -> Result<String, BoxError> {
            Ok(self.0.clone())
        }

        fn unmarshal_text(&mut self, text: &str) -> Result<(), BoxError> {
            self.0 = text.to_owned();
            Ok(())
        }
    }

    #[rstest]
    fn primitives_classify_by_type() {
        let mut flag = false;
        let mut count = 0_i32;
        let mut big = 0_u64;
        let mut name = String::new();
        let mut wait = Duration::ZERO;
        assert_eq!((&&&&Probe::new(&mut flag)).capability().kind(), Some(Kind::Bool));
        assert_eq!((&&&&Probe::new(&mut count)).capability().kind(), Some(Kind::Int));
        assert_eq!((&&&&Probe::new(&mut big)).capability().kind(), Some(Kind::Uint64));
        assert_eq!((&&&&Probe::new(&mut name)).capability().kind(), Some(Kind::String));
        assert_eq!((&&&&Probe::new(&mut wait)).capability().kind(), Some(Kind::Duration));
    }

    #[rstest]
    fn value_wins_over_text_codec() {
        let mut both = Both::default();
        assert_eq!((&&&&Probe::new(&mut both)).capability().kind(), Some(Kind::Value));
    }

    #[rstest]
    fn text_codec_is_recognised() {
        let mut text = TextOnly::default();
        assert_eq!((&&&&Probe::new(&mut text)).capability().kind(), Some(Kind::Text));
    }

    #[rstest]
    fn unknown_types_are_unsupported() {
        let mut bytes: Vec<u8> = Vec::new();
        let capability = (&&&&Probe::new(&mut bytes)).capability();
        assert!(
            matches!(capability, Capability::Unsupported(name) if name.contains("Vec<u8>")),
            "got {capability:?}"
        );
    }
}
