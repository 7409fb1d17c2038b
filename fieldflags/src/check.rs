//! Entry points that turn records into flag descriptors and bind them.

use crate::error::FlagError;
use crate::field::{Field, Fields};
use crate::record::{Record, RecordField};
use crate::registrar::Registrar;
use crate::resolve::{Environment, ProcessEnv};
use crate::tag::parse_tag;

/// Collects the flaggable fields of `record`, reading `$NAME` defaults from
/// the process environment.
///
/// A field is flaggable when it is public and carries a `#[flag]` tag.
/// Untagged and private fields are ignored. See [`crate::parse_tag`] for the
/// tag grammar and [`crate::resolve`] for default expressions.
///
/// # Errors
///
/// Fails without a partial result when a tag is malformed, a tagged field
/// has an unsupported type, a default cannot be converted, or no field is
/// flaggable.
pub fn check<R>(record: &mut R) -> Result<Fields<'_>, FlagError>
where
    R: Record + ?Sized,
{
    check_with_env(record, &ProcessEnv)
}

/// Like [`check`], but resolves `$NAME` defaults through `env`.
///
/// # Errors
///
/// See [`check`].
pub fn check_with_env<'a, R, V>(record: &'a mut R, env: &V) -> Result<Fields<'a>, FlagError>
where
    R: Record + ?Sized,
    V: Environment + ?Sized,
{
    let mut fields = Vec::new();
    for candidate in record.fields() {
        let RecordField {
            ident,
            exported,
            tag,
            default_tag,
            capability,
        } = candidate;
        let Some(text) = tag else {
            continue;
        };
        if !exported {
            tracing::debug!(field = ident, "ignoring tag on private field");
            continue;
        }

        let expr = parse_tag(text)
            .and_then(|expr| expr.apply_default_tag(default_tag))
            .map_err(|source| FlagError::MalformedTag {
                field: ident.to_owned(),
                source,
            })?;
        fields.push(Field::build(ident, expr, capability, env)?);
    }
    Fields::new(fields)
}

/// Checks `record` and registers its flags with `registrar`.
///
/// # Errors
///
/// Returns the first check or registration error.
pub fn bind<'a, G, R>(registrar: &mut G, record: &'a mut R) -> Result<(), FlagError>
where
    G: Registrar<'a> + ?Sized,
    R: Record + ?Sized,
{
    check(record)?.bind(registrar)
}

/// Checks every record, then registers all of their flags.
///
/// Nothing is registered unless every record checks successfully.
///
/// # Errors
///
/// Returns the first check or registration error.
pub fn bind_all<'a, G, I>(registrar: &mut G, records: I) -> Result<(), FlagError>
where
    G: Registrar<'a> + ?Sized,
    I: IntoIterator<Item = &'a mut dyn Record>,
{
    let checked = records
        .into_iter()
        .map(check)
        .collect::<Result<Vec<_>, _>>()?;
    checked
        .into_iter()
        .try_for_each(|fields| fields.bind(registrar))
}

/// Like [`check`], for initialization code that cannot continue without
/// its flags.
///
/// # Panics
///
/// Panics with `check flags: <error>` when [`check`] fails.
#[track_caller]
pub fn must_check<R>(record: &mut R) -> Fields<'_>
where
    R: Record + ?Sized,
{
    match check(record) {
        Ok(fields) => fields,
        Err(err) => panic!("check flags: {err}"),
    }
}

/// Like [`bind`], for initialization code that cannot continue without
/// its flags.
///
/// # Panics
///
/// Panics with `check flags: <error>` when the record is invalid, or
/// `bind flags: <error>` when registration fails.
#[track_caller]
pub fn must_bind<'a, G, R>(registrar: &mut G, record: &'a mut R)
where
    G: Registrar<'a> + ?Sized,
    R: Record + ?Sized,
{
    if let Err(err) = must_check(record).bind(registrar) {
        panic!("bind flags: {err}");
    }
}

/// Calls [`must_bind`] for each record in turn.
///
/// # Panics
///
/// See [`must_bind`].
#[track_caller]
pub fn must_bind_all<'a, G, I>(registrar: &mut G, records: I)
where
    G: Registrar<'a> + ?Sized,
    I: IntoIterator<Item = &'a mut dyn Record>,
{
    for record in records {
        must_bind(registrar, record);
    }
}
