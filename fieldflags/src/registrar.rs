//! The flag-registration target that descriptors bind to.

use std::time::Duration;

use crate::capability::{TextCodec, Value};
use crate::error::FlagError;

/// A flag set that can register variables backed by record fields.
///
/// The typed operations receive the effective default and are expected to
/// store it into `target` before any command-line parsing happens, so the
/// field holds its default even when the flag is never given. Settable
/// values and text codecs have already received their default by the time
/// they are registered.
///
/// [`crate::FlagSet`] is the bundled implementation.
pub trait Registrar<'a> {
    /// Registers a boolean flag.
    ///
    /// # Errors
    ///
    /// Returns an error when the flag cannot be registered, for example
    /// because the name is taken.
    fn bool_var(&mut self, target: &'a mut bool, name: &str, default: bool, usage: &str) -> Result<(), FlagError>;

    /// Registers a floating-point flag.
    ///
    /// # Errors
    ///
    /// See [`Registrar::bool_var`].
    fn f64_var(&mut self, target: &'a mut f64, name: &str, default: f64, usage: &str) -> Result<(), FlagError>;

    /// Registers a 32-bit signed integer flag.
    ///
    /// # Errors
    ///
    /// See [`Registrar::bool_var`].
    fn i32_var(&mut self, target: &'a mut i32, name: &str, default: i32, usage: &str) -> Result<(), FlagError>;

    /// Registers a 64-bit signed integer flag.
    ///
    /// # Errors
    ///
    /// See [`Registrar::bool_var`].
    fn i64_var(&mut self, target: &'a mut i64, name: &str, default: i64, usage: &str) -> Result<(), FlagError>;

    /// Registers a 32-bit unsigned integer flag.
    ///
    /// # Errors
    ///
    /// See [`Registrar::bool_var`].
    fn u32_var(&mut self, target: &'a mut u32, name: &str, default: u32, usage: &str) -> Result<(), FlagError>;

    /// Registers a 64-bit unsigned integer flag.
    ///
    /// # Errors
    ///
    /// See [`Registrar::bool_var`].
    fn u64_var(&mut self, target: &'a mut u64, name: &str, default: u64, usage: &str) -> Result<(), FlagError>;

    /// Registers a string flag.
    ///
    /// # Errors
    ///
    /// See [`Registrar::bool_var`].
    fn string_var(
        &mut self,
        target: &'a mut String,
        name: &str,
        default: String,
        usage: &str,
    ) -> Result<(), FlagError>;

    /// Registers a duration flag.
    ///
    /// # Errors
    ///
    /// See [`Registrar::bool_var`].
    fn duration_var(
        &mut self,
        target: &'a mut Duration,
        name: &str,
        default: Duration,
        usage: &str,
    ) -> Result<(), FlagError>;

    /// Registers a settable value; its current state is the default.
    ///
    /// # Errors
    ///
    /// See [`Registrar::bool_var`].
    fn value_var(&mut self, target: &'a mut dyn Value, name: &str, usage: &str) -> Result<(), FlagError>;

    /// Registers a text codec; its current rendering is the default.
    ///
    /// # Errors
    ///
    /// See [`Registrar::bool_var`]. Implementations may also fail when the
    /// current state cannot be rendered.
    fn text_var(&mut self, target: &'a mut dyn TextCodec, name: &str, usage: &str) -> Result<(), FlagError>;
}
