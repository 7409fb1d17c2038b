//! Code generation for `#[derive(Flags)]`.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FieldInput, RecordInput};

/// Emits `impl Record` for the parsed struct.
///
/// Each field is classified with the ranked probe traits, so the impl
/// compiles for any field type and unsupported types are reported at check
/// time.
pub(crate) fn record_impl(record: &RecordInput<'_>) -> TokenStream {
    let krate = record
        .crate_path
        .as_ref()
        .map_or_else(|| quote! { ::fieldflags }, |path| quote! { #path });
    let ident = record.ident;
    let (impl_generics, ty_generics, where_clause) = record.generics.split_for_impl();
    let entries = record.fields.iter().map(|field| field_entry(&krate, field));
    let imports = (!record.fields.is_empty()).then(|| {
        quote! {
            use #krate::__private::{
                PrimitiveProbe as _, Probe, TextProbe as _, UnsupportedProbe as _, ValueProbe as _,
            };
        }
    });

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<#krate::RecordField<'_>> {
                #imports
                ::std::vec![#(#entries),*]
            }
        }
    }
}

fn field_entry(krate: &TokenStream, field: &FieldInput<'_>) -> TokenStream {
    let FieldInput {
        member,
        name,
        exported,
        tag,
        default_tag,
    } = field;
    let tag = option_tokens(tag.as_ref());
    let default_tag = option_tokens(default_tag.as_ref());
    quote! {
        #krate::RecordField {
            ident: #name,
            exported: #exported,
            tag: #tag,
            default_tag: #default_tag,
            capability: (&&&&Probe::new(&mut self.#member)).capability(),
        }
    }
}

fn option_tokens(text: Option<&syn::LitStr>) -> TokenStream {
    text.map_or_else(
        || quote! { ::core::option::Option::None },
        |text| quote! { ::core::option::Option::Some(#text) },
    )
}
