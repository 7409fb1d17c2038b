//! Procedural macros for `fieldflags`.
//!
//! The [`Flags`] derive implements `fieldflags::Record` for structs with
//! named fields, exposing each field's `#[flag]` tag and a classified
//! mutable reference to its storage.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `fieldflags::Record`.
///
/// Field attributes:
///
/// - `#[flag = "name[,default=VALUE],usage"]` marks a field as a flag.
///   Only `pub` fields are bound; tags on private fields are ignored.
/// - `#[flag_default = "VALUE"]` supplies the default outside the tag text.
///   It cannot be combined with an inline `default=`.
///
/// Struct attribute:
///
/// - `#[flags(crate = "path")]` names the `fieldflags` crate when it is
///   imported under another name.
///
/// A field is classified by its type: a `fieldflags::Value` implementation
/// first, then a `fieldflags::TextCodec` implementation, then one of the
/// built-in primitives. Any other type is reported by `fieldflags::check`
/// when the field is tagged.
#[proc_macro_derive(Flags, attributes(flag, flag_default, flags))]
pub fn derive_flags(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
