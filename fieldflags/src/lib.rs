//! Declarative command-line flags for configuration structs.
//!
//! Tag the public fields of a struct with `#[flag = "name,usage"]` and derive
//! [`Flags`]; [`check`] then produces one [`Field`] descriptor per tagged
//! field and [`bind`] attaches them to a [`Registrar`] such as the bundled
//! clap-backed [`FlagSet`]. Parsed values are written straight into the
//! struct.
//!
//! ```
//! use std::time::Duration;
//!
//! use fieldflags::{FlagSet, Flags};
//!
//! #[derive(Flags)]
//! struct Server {
//!     #[flag = "addr,default=localhost:8080,Address to listen on"]
//!     pub addr: String,
//!     #[flag = "timeout,default=30s,Request timeout"]
//!     pub timeout: Duration,
//!     #[flag = "debug,Enable debug logging"]
//!     pub debug: bool,
//! }
//!
//! # fn main() -> Result<(), fieldflags::FlagError> {
//! let mut server = Server {
//!     addr: String::new(),
//!     timeout: Duration::ZERO,
//!     debug: false,
//! };
//! let mut flags = FlagSet::new("server");
//! fieldflags::bind(&mut flags, &mut server)?;
//! flags.parse(["--debug", "--timeout=5s"])?;
//! drop(flags);
//!
//! assert_eq!(server.addr, "localhost:8080");
//! assert_eq!(server.timeout, Duration::from_secs(5));
//! assert!(server.debug);
//! # Ok(())
//! # }
//! ```
//!
//! # Tags
//!
//! A tag reads `name[,default=VALUE],usage`. `VALUE` may be single-quoted to
//! contain commas, with `''` standing for a literal quote. The default may
//! instead be given with a separate `#[flag_default = "VALUE"]` attribute,
//! but not both.
//!
//! # Defaults
//!
//! | Default | Effect |
//! | --- | --- |
//! | `$NAME` | Value of environment variable `NAME` (empty when unset) |
//! | `$$text` | Literal `$text` |
//! | `*` | Keep the field's current value |
//! | `**` | Literal `*` |
//! | empty | The type's zero value |
//!
//! Fields whose default came from the environment get `[env: NAME]` appended
//! to their usage text.

mod capability;
mod check;
mod convert;
mod error;
mod field;
mod flag_set;
mod record;
mod registrar;
mod resolve;
mod tag;

pub use capability::{Capability, Kind, TextCodec, Value};
pub use check::{bind, bind_all, check, check_with_env, must_bind, must_bind_all, must_check};
pub use convert::{ConvertError, Primitive, format_duration, parse_duration};
pub use error::{BoxError, FlagError, TagError};
pub use field::{Field, Fields};
pub use flag_set::{FlagInfo, FlagSet};
pub use record::{Record, RecordField};
pub use registrar::Registrar;
pub use resolve::{Environment, ProcessEnv, Resolved, resolve};
pub use tag::{TagExpr, parse_tag};

#[cfg(feature = "derive")]
pub use fieldflags_macros::Flags;

/// Items referenced by code generated from `#[derive(Flags)]`.
#[doc(hidden)]
pub mod __private {
    pub use crate::capability::probe::{
        PrimitiveProbe, Probe, TextProbe, UnsupportedProbe, ValueProbe,
    };
}
