//! Resolution of default expressions into effective defaults.
//!
//! A default expression is the raw text taken from a tag. Before it is
//! converted to the field's type, leading sigils select where the text comes
//! from:
//!
//! | Expression | Effective default                                   |
//! |------------|-----------------------------------------------------|
//! | `$$text`   | the literal `$text`                                 |
//! | `$NAME`    | the value of environment variable `NAME`, or empty  |
//! | `**`       | the literal `*`                                     |
//! | `*`        | the field's current value, unparsed                 |
//! | `text`     | `text`                                              |
//!
//! An empty result yields the type's zero value without parsing.

use std::collections::HashMap;
use std::hash::BuildHasher;

#[cfg(test)]
mod tests;

/// Read-only access to environment variables.
///
/// The resolver never touches process state directly, so tests can supply a
/// map or closure instead of mutating the real environment.
pub trait Environment {
    /// Returns the value of `name`, or `None` when it is unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

impl<S: BuildHasher> Environment for HashMap<String, String, S> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<F> Environment for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// An effective default and the environment variable it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    /// The effective default.
    pub value: T,
    /// Environment variable named by a `$NAME` expression, if any.
    pub env: Option<String>,
}

/// Resolves `expr` against the field's `current` value and `env`.
///
/// `parse` converts non-empty text into the field's type; it is not called
/// for the self-reference `*` or for empty text.
///
/// # Errors
///
/// Propagates the error returned by `parse`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use fieldflags::resolve;
///
/// let env = HashMap::from([("PORT".to_owned(), "8080".to_owned())]);
/// let port = resolve("$PORT", 0_u16, str::parse::<u16>, &env).expect("valid port");
/// assert_eq!(port.value, 8080);
/// assert_eq!(port.env.as_deref(), Some("PORT"));
///
/// let kept = resolve("*", 3_u16, str::parse::<u16>, &env).expect("self reference");
/// assert_eq!(kept.value, 3);
/// ```
pub fn resolve<T, E, F, V>(expr: &str, current: T, parse: F, env: &V) -> Result<Resolved<T>, E>
where
    T: Default,
    F: FnOnce(&str) -> Result<T, E>,
    V: Environment + ?Sized,
{
    let mut source = None;
    let text = if expr.starts_with("$$") {
        expr.get(1..).unwrap_or_default().to_owned()
    } else if let Some(name) = expr.strip_prefix('$') {
        let value = env.var(name).unwrap_or_default();
        tracing::trace!(variable = name, found = !value.is_empty(), "default read from environment");
        if !name.is_empty() {
            source = Some(name.to_owned());
        }
        value
    } else if expr == "**" {
        "*".to_owned()
    } else if expr == "*" {
        return Ok(Resolved {
            value: current,
            env: None,
        });
    } else {
        expr.to_owned()
    };

    let value = if text.is_empty() {
        T::default()
    } else {
        parse(&text)?
    };
    Ok(Resolved { value, env: source })
}
