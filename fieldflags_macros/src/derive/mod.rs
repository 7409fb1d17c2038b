//! Expansion of `#[derive(Flags)]`.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod generate;
mod parse;

/// Parses `input` and emits its `Record` implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let record = parse::parse_input(input)?;
    Ok(generate::record_impl(&record))
}
