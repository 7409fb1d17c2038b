//! Flag descriptors produced by [`crate::check`].

use std::fmt;
use std::time::Duration;

use crate::capability::{Capability, Kind, TextCodec, Value};
use crate::convert::Primitive;
use crate::error::{BoxError, FlagError};
use crate::registrar::Registrar;
use crate::resolve::{Environment, resolve};
use crate::tag::TagExpr;

/// Target reference and effective default of a primitive field.
struct Typed<'a, T> {
    target: &'a mut T,
    default: T,
}

impl<T: Primitive> Typed<'_, T> {
    fn default_text(&self) -> String {
        self.default.render_text()
    }
}

enum Binding<'a> {
    Value(&'a mut dyn Value),
    Text(&'a mut dyn TextCodec),
    Bool(Typed<'a, bool>),
    Float(Typed<'a, f64>),
    Int(Typed<'a, i32>),
    Int64(Typed<'a, i64>),
    Uint(Typed<'a, u32>),
    Uint64(Typed<'a, u64>),
    String(Typed<'a, String>),
    Duration(Typed<'a, Duration>),
}

/// A single flaggable field of a record.
///
/// `name` and `usage` may be edited before the field is bound. Binding
/// consumes the descriptor, so a field can be attached to at most one
/// registration target.
pub struct Field<'a> {
    /// Flag name.
    pub name: String,
    /// Usage text, without the environment annotation.
    pub usage: String,
    field: &'static str,
    env: Option<String>,
    binding: Binding<'a>,
}

impl<'a> Field<'a> {
    /// Builds the descriptor for one tagged field, resolving its default.
    pub(crate) fn build<V>(
        field: &'static str,
        tag: TagExpr,
        capability: Capability<'a>,
        environment: &V,
    ) -> Result<Self, FlagError>
    where
        V: Environment + ?Sized,
    {
        let TagExpr {
            name,
            default,
            usage,
        } = tag;
        let expr = default.unwrap_or_default();
        let invalid = |source: BoxError| FlagError::InvalidDefault {
            field: field.to_owned(),
            flag: name.clone(),
            source,
        };

        let (binding, env) = match capability {
            Capability::Value(target) => resolve(&expr, (), |text| target.set(text), environment)
                .map(move |resolved| (Binding::Value(target), resolved.env)),
            Capability::Text(target) => {
                resolve(&expr, (), |text| target.unmarshal_text(text), environment)
                    .map(move |resolved| (Binding::Text(target), resolved.env))
            }
            Capability::Bool(target) => primitive(target, &expr, environment, Binding::Bool),
            Capability::Float(target) => primitive(target, &expr, environment, Binding::Float),
            Capability::Int(target) => primitive(target, &expr, environment, Binding::Int),
            Capability::Int64(target) => primitive(target, &expr, environment, Binding::Int64),
            Capability::Uint(target) => primitive(target, &expr, environment, Binding::Uint),
            Capability::Uint64(target) => primitive(target, &expr, environment, Binding::Uint64),
            Capability::String(target) => primitive(target, &expr, environment, Binding::String),
            Capability::Duration(target) => primitive(target, &expr, environment, Binding::Duration),
            Capability::Unsupported(type_name) => {
                return Err(FlagError::UnsupportedType {
                    field: field.to_owned(),
                    type_name,
                });
            }
        }
        .map_err(invalid)?;

        if let Some(var) = &env {
            tracing::debug!(flag = %name, variable = %var, "default sourced from environment");
        }
        Ok(Self {
            name,
            usage,
            field,
            env,
            binding,
        })
    }

    /// Identifier of the record field this flag controls.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Environment variable the default was read from, if any.
    #[must_use]
    pub fn env(&self) -> Option<&str> {
        self.env.as_deref()
    }

    /// How the field is bound.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match &self.binding {
            Binding::Value(_) => Kind::Value,
            Binding::Text(_) => Kind::Text,
            Binding::Bool(_) => Kind::Bool,
            Binding::Float(_) => Kind::Float,
            Binding::Int(_) => Kind::Int,
            Binding::Int64(_) => Kind::Int64,
            Binding::Uint(_) => Kind::Uint,
            Binding::Uint64(_) => Kind::Uint64,
            Binding::String(_) => Kind::String,
            Binding::Duration(_) => Kind::Duration,
        }
    }

    /// The effective default rendered as command-line text.
    ///
    /// Settable values and text codecs report their current state, which
    /// already reflects the default. A text codec that fails to render
    /// reports an empty string.
    #[must_use]
    pub fn default_text(&self) -> String {
        match &self.binding {
            Binding::Value(target) => target.to_string(),
            Binding::Text(target) => target.marshal_text().unwrap_or_default(),
            Binding::Bool(typed) => typed.default_text(),
            Binding::Float(typed) => typed.default_text(),
            Binding::Int(typed) => typed.default_text(),
            Binding::Int64(typed) => typed.default_text(),
            Binding::Uint(typed) => typed.default_text(),
            Binding::Uint64(typed) => typed.default_text(),
            Binding::String(typed) => typed.default_text(),
            Binding::Duration(typed) => typed.default_text(),
        }
    }

    /// Usage text as shown to the registration target, including the
    /// `[env: NAME]` annotation when the default came from the environment.
    #[must_use]
    pub fn display_usage(&self) -> String {
        self.env
            .as_ref()
            .map_or_else(|| self.usage.clone(), |var| format!("{} [env: {var}]", self.usage))
    }

    /// Registers this flag with `registrar`.
    ///
    /// # Errors
    ///
    /// Propagates the registrar's error, for example a duplicate name.
    pub fn bind<R>(self, registrar: &mut R) -> Result<(), FlagError>
    where
        R: Registrar<'a> + ?Sized,
    {
        let usage = self.display_usage();
        let name = self.name.as_str();
        tracing::debug!(flag = name, field = self.field, kind = %self.kind(), "binding flag");
        match self.binding {
            Binding::Value(target) => registrar.value_var(target, name, &usage),
            Binding::Text(target) => registrar.text_var(target, name, &usage),
            Binding::Bool(Typed { target, default }) => registrar.bool_var(target, name, default, &usage),
            Binding::Float(Typed { target, default }) => registrar.f64_var(target, name, default, &usage),
            Binding::Int(Typed { target, default }) => registrar.i32_var(target, name, default, &usage),
            Binding::Int64(Typed { target, default }) => registrar.i64_var(target, name, default, &usage),
            Binding::Uint(Typed { target, default }) => registrar.u32_var(target, name, default, &usage),
            Binding::Uint64(Typed { target, default }) => registrar.u64_var(target, name, default, &usage),
            Binding::String(Typed { target, default }) => registrar.string_var(target, name, default, &usage),
            Binding::Duration(Typed { target, default }) => {
                registrar.duration_var(target, name, default, &usage)
            }
        }
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("field", &self.field)
            .field("env", &self.env)
            .field("kind", &self.kind())
            .field("default", &self.default_text())
            .finish()
    }
}

/// Resolves the default of a primitive field and wraps it with `wrap`.
fn primitive<'a, T, V>(
    target: &'a mut T,
    expr: &str,
    environment: &V,
    wrap: fn(Typed<'a, T>) -> Binding<'a>,
) -> Result<(Binding<'a>, Option<String>), BoxError>
where
    T: Primitive,
    V: Environment + ?Sized,
{
    let resolved = resolve(expr, target.clone(), T::parse_text, environment)?;
    let typed = Typed {
        target,
        default: resolved.value,
    };
    Ok((wrap(typed), resolved.env))
}

/// The flaggable fields of a record, in declaration order.
///
/// Never empty: [`crate::check`] reports [`FlagError::NoFlaggableFields`]
/// instead of returning an empty collection.
#[derive(Debug)]
pub struct Fields<'a> {
    fields: Vec<Field<'a>>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(fields: Vec<Field<'a>>) -> Result<Self, FlagError> {
        if fields.is_empty() {
            return Err(FlagError::NoFlaggableFields);
        }
        Ok(Self { fields })
    }

    /// Returns the first field whose flag name is `name`.
    ///
    /// When several fields share a name only the first is reachable here.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<&Field<'a>> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Mutable variant of [`Fields::flag`].
    pub fn flag_mut(&mut self, name: &str) -> Option<&mut Field<'a>> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    /// Iterates over the fields in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field<'a>> {
        self.fields.iter()
    }

    /// Iterates mutably over the fields in declaration order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Field<'a>> {
        self.fields.iter_mut()
    }

    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`; provided for symmetry with [`Fields::len`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Registers every field with `registrar`, in declaration order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first registration error.
    pub fn bind<R>(self, registrar: &mut R) -> Result<(), FlagError>
    where
        R: Registrar<'a> + ?Sized,
    {
        self.fields
            .into_iter()
            .try_for_each(|field| field.bind(registrar))
    }
}

impl<'a> IntoIterator for Fields<'a> {
    type Item = Field<'a>;
    type IntoIter = std::vec::IntoIter<Field<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'f, 'a> IntoIterator for &'f Fields<'a> {
    type Item = &'f Field<'a>;
    type IntoIter = std::slice::Iter<'f, Field<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<'f, 'a> IntoIterator for &'f mut Fields<'a> {
    type Item = &'f mut Field<'a>;
    type IntoIter = std::slice::IterMut<'f, Field<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter_mut()
    }
}
