//! Error types produced while checking, binding and parsing flags.

use thiserror::Error;

/// Boxed error returned by user-supplied conversions such as [`crate::Value::set`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Grammar violations in a `#[flag = "..."]` tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TagError {
    /// The tag lacks the comma separating the name from the usage text.
    #[error("invalid flag tag format {0:?}")]
    InvalidFormat(String),

    /// The tag's name segment is empty.
    #[error("empty flag name")]
    EmptyName,

    /// The inline `default=` literal is unterminated or not followed by usage text.
    #[error("invalid default format {0:?}")]
    InvalidDefault(String),

    /// Both an inline `default=` and a `#[flag_default]` attribute were given.
    #[error("default tag and inline default are both set")]
    ConflictingDefaults,
}

/// Errors reported by [`crate::check`], registration and flag parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// The tag attached to `field` could not be parsed.
    #[error("field {field:?}: {source}")]
    MalformedTag {
        /// Record field carrying the tag.
        field: String,
        /// Grammar violation.
        #[source]
        source: TagError,
    },

    /// The field's type has no flag representation.
    #[error("field {field:?}: type {type_name} is not flag compatible")]
    UnsupportedType {
        /// Record field with the unsupported type.
        field: String,
        /// Fully qualified type name of the field.
        type_name: &'static str,
    },

    /// The resolved default could not be converted to the field's type.
    #[error("field {field:?}: invalid default for {flag:?}: {source}")]
    InvalidDefault {
        /// Record field whose default failed.
        field: String,
        /// Flag name declared in the tag.
        flag: String,
        /// Conversion failure.
        #[source]
        source: BoxError,
    },

    /// The record has no exported, tagged fields.
    #[error("no flaggable fields")]
    NoFlaggableFields,

    /// A registration target refused the flag name.
    #[error("invalid flag name {name:?}: {reason}")]
    InvalidFlagName {
        /// Rejected name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// A flag with this name is already registered.
    #[error("flag redefined: {name}")]
    DuplicateFlag {
        /// Name registered twice.
        name: String,
    },

    /// A text-codec value could not render its current state.
    #[error("rendering default for flag {flag:?}: {source}")]
    Render {
        /// Flag whose value failed to render.
        flag: String,
        /// Marshalling failure.
        #[source]
        source: BoxError,
    },

    /// A command-line value could not be applied to its flag.
    #[error("invalid value {value:?} for flag --{flag}: {source}")]
    InvalidValue {
        /// Flag receiving the value.
        flag: String,
        /// Raw command-line text.
        value: String,
        /// Conversion failure.
        #[source]
        source: BoxError,
    },

    /// Command-line parsing failed, or help/version output was requested.
    #[error("failed to parse command-line arguments: {0}")]
    Cli(#[from] Box<clap::Error>),
}

impl FlagError {
    /// Reports whether this error is clap asking to print help or version text
    /// rather than a genuine parse failure.
    #[must_use]
    pub fn is_display_request(&self) -> bool {
        let Self::Cli(err) = self else {
            return false;
        };
        matches!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelp
                | clap::error::ErrorKind::DisplayVersion
                | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        )
    }

    /// Returns the record field this error refers to, when it concerns one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MalformedTag { field, .. }
            | Self::UnsupportedType { field, .. }
            | Self::InvalidDefault { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<clap::Error> for FlagError {
    fn from(err: clap::Error) -> Self {
        Self::Cli(Box::new(err))
    }
}
