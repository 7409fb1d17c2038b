//! Records whose fields can be inspected for flag tags.

use crate::capability::Capability;

/// A struct-like value exposing its fields to [`crate::check`].
///
/// Normally implemented by `#[derive(Flags)]`. A manual implementation must
/// return one entry per field, in declaration order.
///
/// ```
/// use fieldflags::{Capability, Record, RecordField};
///
/// struct Limits {
///     retries: u32,
/// }
///
/// impl Record for Limits {
///     fn fields(&mut self) -> Vec<RecordField<'_>> {
///         vec![RecordField {
///             ident: "retries",
///             exported: true,
///             tag: Some("retries,default=3,Attempts before giving up"),
///             default_tag: None,
///             capability: Capability::Uint(&mut self.retries),
///         }]
///     }
/// }
///
/// let mut limits = Limits { retries: 0 };
/// let fields = fieldflags::check(&mut limits).expect("valid record");
/// assert_eq!(fields.flag("retries").map(|f| f.default_text()).as_deref(), Some("3"));
/// ```
pub trait Record {
    /// Lists every field with its tag text and classified storage.
    fn fields(&mut self) -> Vec<RecordField<'_>>;
}

/// One field of a [`Record`].
#[derive(Debug)]
pub struct RecordField<'a> {
    /// Field identifier as written in the struct.
    pub ident: &'static str,
    /// Whether the field is public. Private fields are never flagged.
    pub exported: bool,
    /// Text of the `#[flag = "..."]` attribute, if present.
    pub tag: Option<&'static str>,
    /// Text of the `#[flag_default = "..."]` attribute, if present.
    pub default_tag: Option<&'static str>,
    /// The field's storage.
    pub capability: Capability<'a>,
}
