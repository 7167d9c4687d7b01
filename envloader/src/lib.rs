//! Populate configuration structs in place from tagged environment variables
//!
//! Each field names the variable it is read from through a tag, and the
//! field's own type decides how the value is parsed. Nested records are
//! walked depth-first. Every failure is collected, so a single call reports
//! every problem with the configuration at once.
//!
//! # Features
//!
//! - **Declarative**: field tags with `#[derive(Record)]`
//! - **Multiple tag names**: one struct can carry tags for several sources
//! - **In place**: existing values survive for untagged or failing fields
//! - **Complete reports**: all field errors are returned, not just the first
//!
//! # Value Parsing
//!
//! Values are trimmed and one layer of surrounding double quotes is removed
//! before parsing.
//!
//! - Strings: `NAME="my service"` is read as `my service`
//! - Integers and floats: `WORKERS=8`, `RATIO=0.75` (range-checked per width)
//! - Booleans: `1 t T TRUE true True` and `0 f F FALSE false False`
//! - Durations: `TIMEOUT=1m30s`, or a bare `TIMEOUT=90` meaning seconds.
//!   `std::time::Duration` rejects negative values; `chrono::TimeDelta`
//!   accepts them (`OFFSET=-1m`, `OFFSET=-10`)
//! - String lists: `HOSTS=a, b, c` becomes `["a", "b", "c"]`
//!
//! # Example
//!
//! ```rust
//! use envloader::Record;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, Record)]
//! struct Config {
//!     #[tag(env = "DATABASE_URL")]
//!     pub database_url: String,
//!
//!     #[tag(env = "REQUEST_TIMEOUT")]
//!     pub timeout: Duration,
//!
//!     // Never read
//!     pub build_id: String,
//!
//!     // Nested records are always visited
//!     pub server: Server,
//! }
//!
//! #[derive(Debug, Default, Record)]
//! struct Server {
//!     #[tag(env = "SERVER_PORT")]
//!     pub port: u16,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("DATABASE_URL", "postgres://localhost/db");
//! #     std::env::set_var("REQUEST_TIMEOUT", "30");
//! #     std::env::set_var("SERVER_PORT", "8080");
//! let mut config = Config::default();
//! envloader::try_load_env(&mut config)?;
//! #     assert_eq!(config.database_url, "postgres://localhost/db");
//! #     assert_eq!(config.timeout, Duration::from_secs(30));
//! #     assert_eq!(config.server.port, 8080);
//! #     Ok(())
//! # }
//! ```
//!
//! # Tags
//!
//! `#[tag(name = "VAR", ...)]` maps a tag name to a variable name. A field
//! may carry several tag names; only the one selected by the [`Loader`] is
//! used. A field without the selected tag, or with the value `""` or `"-"`,
//! is left untouched.
//!
//! ```rust
//! # use envloader::Record;
//! #[derive(Default, Record)]
//! struct Config {
//!     // Read from PORT normally, from TEST_PORT with the "test" tag
//!     #[tag(env = "PORT", test = "TEST_PORT")]
//!     pub port: u16,
//!
//!     // Explicitly never read under the "env" tag
//!     #[tag(env = "-")]
//!     pub generated: String,
//! }
//! ```
//!
//! A tagged field of a type without a string conversion is reported as
//! [`ErrorKind::UnsupportedType`] when its variable is present.

pub mod duration;

mod error;
mod loader;
mod scan;
mod source;
mod target;
mod value;

pub use envloader_derive::Record;
pub use error::{ErrorKind, LoadError, LoadErrors, ParseBoolError, ParseError};
pub use loader::{load_env, load_env_from_tag, try_load_env, Loader, DEFAULT_TAG};
pub use scan::{Record, Scanner};
pub use source::{ProcessEnv, Source};
pub use target::Target;
pub use value::FromEnvStr;

// Used by macro-generated code
#[doc(hidden)]
pub mod __private {
    pub use crate::scan::{Field, Probe, ViaOpaque, ViaRecord, ViaValue};
}
