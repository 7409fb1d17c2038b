//! Input parsing for the `Flags` derive macro.
//!
//! Collects the struct identifier, its fields and their tag attributes in
//! one pass so expansion fails fast with a spanned error.

use syn::ext::IdentExt as _;
use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Generics, Ident, Lit, LitStr, Meta, Visibility};

/// A struct accepted by the derive.
pub(crate) struct RecordInput<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub crate_path: Option<syn::Path>,
    pub fields: Vec<FieldInput<'a>>,
}

/// One named field and its flag attributes.
pub(crate) struct FieldInput<'a> {
    pub member: &'a Ident,
    /// Identifier without any `r#` prefix.
    pub name: String,
    pub exported: bool,
    pub tag: Option<LitStr>,
    pub default_tag: Option<LitStr>,
}

pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<RecordInput<'_>> {
    let crate_path = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Flags requires a struct with named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Flags can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(member) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let (tag, default_tag) = parse_field_attrs(&field.attrs)?;
        fields.push(FieldInput {
            member,
            name: member.unraw().to_string(),
            exported: !matches!(field.vis, Visibility::Inherited),
            tag,
            default_tag,
        });
    }

    Ok(RecordInput {
        ident: &input.ident,
        generics: &input.generics,
        crate_path,
        fields,
    })
}

/// Reads `#[flags(crate = "...")]`.
fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<Option<syn::Path>> {
    let mut crate_path = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("flags")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("crate") {
                return Err(meta.error("unsupported flags attribute; expected `crate = \"...\"`"));
            }
            let text: LitStr = meta.value()?.parse()?;
            let path: syn::Path = text.parse()?;
            crate_path = Some(path);
            Ok(())
        })?;
    }
    Ok(crate_path)
}

/// Reads `#[flag = "..."]` and `#[flag_default = "..."]`.
fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<(Option<LitStr>, Option<LitStr>)> {
    let mut tag = None;
    let mut default_tag = None;
    let mut default_attr = None;
    for attr in attrs {
        let slot = if attr.path().is_ident("flag") {
            &mut tag
        } else if attr.path().is_ident("flag_default") {
            default_attr = Some(attr);
            &mut default_tag
        } else {
            continue;
        };
        if slot.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate flag attribute"));
        }
        *slot = Some(string_value(attr)?);
    }
    if let (None, Some(attr)) = (&tag, default_attr) {
        return Err(syn::Error::new_spanned(
            attr,
            "`flag_default` requires a `flag` attribute on the same field",
        ));
    }
    Ok((tag, default_tag))
}

fn string_value(attr: &Attribute) -> syn::Result<LitStr> {
    if let Meta::NameValue(pair) = &attr.meta {
        if let Expr::Lit(ExprLit {
            lit: Lit::Str(text), ..
        }) = &pair.value
        {
            return Ok(text.clone());
        }
    }
    Err(syn::Error::new_spanned(
        attr,
        "expected a string literal, as in `#[flag = \"name,usage\"]`",
    ))
}
