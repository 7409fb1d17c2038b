//! A flag set that stores bindings and delegates parsing to `clap`.

use std::ffi::OsString;
use std::fmt;
use std::time::Duration;

use clap::builder::ValueParser;
use clap::{Arg, ArgAction, Command};

use crate::capability::{Kind, TextCodec, Value};
use crate::convert::Primitive;
use crate::error::{BoxError, FlagError};
use crate::registrar::Registrar;


/// Names clap claims for its own help flag.
const RESERVED: [&str; 2] = ["help", "h"];

type Apply<'a> = Box<dyn FnMut(&str) -> Result<(), BoxError> + 'a>;

/// Description of a registered flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagInfo {
    name: String,
    usage: String,
    default_text: String,
    kind: Kind,
    zero_default: bool,
}

impl FlagInfo {
    /// Flag name, without dashes.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Usage text as registered.
    #[must_use]
    pub const fn usage(&self) -> &str {
        self.usage.as_str()
    }

    /// Default value rendered as command-line text.
    #[must_use]
    pub const fn default_text(&self) -> &str {
        self.default_text.as_str()
    }

    /// How the flag is stored.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Help line: the usage text, followed by `(default X)` unless the
    /// default is the zero value.
    ///
    /// ```
    /// use fieldflags::{FlagSet, Registrar};
    ///
    /// let mut port = 0_u32;
    /// let mut flags = FlagSet::new("demo");
    /// flags.u32_var(&mut port, "port", 8080, "Port to bind")?;
    /// assert_eq!(
    ///     flags.lookup("port").map(|info| info.help()).as_deref(),
    ///     Some("Port to bind (default 8080)")
    /// );
    /// # Ok::<(), fieldflags::FlagError>(())
    /// ```
    #[must_use]
    pub fn help(&self) -> String {
        if self.zero_default {
            return self.usage.clone();
        }
        match self.kind {
            Kind::String => format!("{} (default {:?})", self.usage, self.default_text),
            _ => format!("{} (default {})", self.usage, self.default_text),
        }
    }
}

struct Flag<'a> {
    info: FlagInfo,
    apply: Apply<'a>,
}

/// A named set of flags backed by record fields.
///
/// Flags are spelled `--name value` or `--name=value`; single-character
/// names also accept `-n value`. Boolean flags may be given bare
/// (`--verbose`) or with an explicit value (`--verbose=false`).
pub struct FlagSet<'a> {
    name: String,
    flags: Vec<Flag<'a>>,
}

impl<'a> FlagSet<'a> {
    /// Creates an empty flag set. `name` is the command name shown in help.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: Vec::new(),
        }
    }

    /// Command name shown in help output.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Number of registered flags.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flag has been registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Registered flags sorted by name.
    #[must_use]
    pub fn flags(&self) -> Vec<&FlagInfo> {
        let mut infos: Vec<_> = self.flags.iter().map(|flag| &flag.info).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Returns the flag registered as `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&FlagInfo> {
        self.flags
            .iter()
            .map(|flag| &flag.info)
            .find(|info| info.name == name)
    }

    /// Builds the `clap` command describing these flags.
    #[must_use]
    pub fn command(&self) -> Command {
        let mut infos: Vec<_> = self.flags.iter().map(|flag| &flag.info).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos.into_iter().fold(
            Command::new(self.name.clone())
                .no_binary_name(true)
                .disable_version_flag(true),
            |command, info| command.arg(to_arg(info)),
        )
    }

    /// Renders the help text for these flags.
    #[must_use]
    pub fn render_help(&self) -> String {
        self.command().render_help().to_string()
    }

    /// Parses `args` (without the program name) and stores each value into
    /// its field. Values are applied flag by flag in registration order;
    /// repeats of one flag are applied in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Cli`] when clap rejects the arguments, including
    /// help requests (see [`FlagError::is_display_request`]), and
    /// [`FlagError::InvalidValue`] when a value cannot be converted.
    pub fn parse<I, T>(&mut self, args: I) -> Result<(), FlagError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(args)?;
        for flag in &mut self.flags {
            let Some(values) = matches.get_many::<String>(&flag.info.name) else {
                continue;
            };
            for value in values {
                tracing::trace!(flag = %flag.info.name, %value, "applying flag value");
                (flag.apply)(value).map_err(|source| FlagError::InvalidValue {
                    flag: flag.info.name.clone(),
                    value: value.clone(),
                    source,
                })?;
            }
        }
        Ok(())
    }

    fn validate(&self, name: &str) -> Result<(), FlagError> {
        let invalid = |reason| FlagError::InvalidFlagName {
            name: name.to_owned(),
            reason,
        };
        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if name.starts_with('-') {
            return Err(invalid("name starts with '-'"));
        }
        if name.contains('=') {
            return Err(invalid("name contains '='"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(invalid("name contains whitespace"));
        }
        if RESERVED.contains(&name) || self.lookup(name).is_some() {
            return Err(FlagError::DuplicateFlag {
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    fn push(&mut self, info: FlagInfo, apply: Apply<'a>) {
        tracing::debug!(flag = %info.name, kind = %info.kind, "registered flag");
        self.flags.push(Flag { info, apply });
    }

    fn typed<T>(&mut self, target: &'a mut T, name: &str, default: T, usage: &str) -> Result<(), FlagError>
    where
        T: Primitive + 'a,
    {
        self.validate(name)?;
        let info = FlagInfo {
            name: name.to_owned(),
            usage: usage.to_owned(),
            default_text: default.render_text(),
            kind: T::KIND,
            zero_default: default == T::default(),
        };
        *target = default;
        self.push(
            info,
            Box::new(move |text| {
                *target = T::parse_text(text)?;
                Ok(())
            }),
        );
        Ok(())
    }
}

impl<'a> Registrar<'a> for FlagSet<'a> {
    fn bool_var(&mut self, target: &'a mut bool, name: &str, default: bool, usage: &str) -> Result<(), FlagError> {
        self.typed(target, name, default, usage)
    }

    fn f64_var(&mut self, target: &'a mut f64, name: &str, default: f64, usage: &str) -> Result<(), FlagError> {
        self.typed(target, name, default, usage)
    }

    fn i32_var(&mut self, target: &'a mut i32, name: &str, default: i32, usage: &str) -> Result<(), FlagError> {
        self.typed(target, name, default, usage)
    }

    fn i64_var(&mut self, target: &'a mut i64, name: &str, default: i64, usage: &str) -> Result<(), FlagError> {
        self.typed(target, name, default, usage)
    }

    fn u32_var(&mut self, target: &'a mut u32, name: &str, default: u32, usage: &str) -> Result<(), FlagError> {
        self.typed(target, name, default, usage)
    }

    fn u64_var(&mut self, target: &'a mut u64, name: &str, default: u64, usage: &str) -> Result<(), FlagError> {
        self.typed(target, name, default, usage)
    }

    fn string_var(
        &mut self,
        target: &'a mut String,
        name: &str,
        default: String,
        usage: &str,
    ) -> Result<(), FlagError> {
        self.typed(target, name, default, usage)
    }

    fn duration_var(
        &mut self,
        target: &'a mut Duration,
        name: &str,
        default: Duration,
        usage: &str,
    ) -> Result<(), FlagError> {
        self.typed(target, name, default, usage)
    }

    fn value_var(&mut self, target: &'a mut dyn Value, name: &str, usage: &str) -> Result<(), FlagError> {
        self.validate(name)?;
        let default_text = target.to_string();
        let info = FlagInfo {
            name: name.to_owned(),
            usage: usage.to_owned(),
            zero_default: default_text.is_empty(),
            default_text,
            kind: Kind::Value,
        };
        self.push(info, Box::new(move |text| target.set(text)));
        Ok(())
    }

    fn text_var(&mut self, target: &'a mut dyn TextCodec, name: &str, usage: &str) -> Result<(), FlagError> {
        self.validate(name)?;
        let default_text = target.marshal_text().map_err(|source| FlagError::Render {
            flag: name.to_owned(),
            source,
        })?;
        let info = FlagInfo {
            name: name.to_owned(),
            usage: usage.to_owned(),
            zero_default: default_text.is_empty(),
            default_text,
            kind: Kind::Text,
        };
        self.push(info, Box::new(move |text| target.unmarshal_text(text)));
        Ok(())
    }
}

impl fmt::Debug for FlagSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSet")
            .field("name", &self.name)
            .field("flags", &self.flags())
            .finish()
    }
}

fn to_arg(info: &FlagInfo) -> Arg {
    let mut arg = Arg::new(info.name.clone())
        .long(info.name.clone())
        .help(info.help())
        .value_name(info.kind.hint())
        .action(ArgAction::Append)
        .value_parser(ValueParser::string());
    let mut chars = info.name.chars();
    if let (Some(short), None) = (chars.next(), chars.next()) {
        arg = arg.short(short);
    }
    if info.kind == Kind::Bool {
        arg = arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true");
    } else {
        arg = arg.allow_hyphen_values(true);
    }
    arg
}
