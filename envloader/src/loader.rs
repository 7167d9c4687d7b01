//! Entry points for populating a record

use std::fmt;

use crate::error::{LoadError, LoadErrors};
use crate::scan::{Record, Scanner};
use crate::source::{ProcessEnv, Source};
use crate::target::Target;

/// Tag name used when none is given.
pub const DEFAULT_TAG: &str = "env";

/// Loads records from a [`Source`] using one tag name.
///
/// ```rust
/// use envloader::{Loader, Record};
/// use std::collections::HashMap;
///
/// #[derive(Debug, Default, Record)]
/// struct Config {
///     #[tag(env = "PORT", test = "TEST_PORT")]
///     port: u16,
/// }
///
/// let vars = HashMap::from([("TEST_PORT".to_string(), "9000".to_string())]);
/// let mut config = Config::default();
/// let errors = Loader::new().tag("test").source(&vars).load(&mut config);
/// assert!(errors.is_empty());
/// assert_eq!(config.port, 9000);
/// ```
#[derive(Clone, Copy)]
pub struct Loader<'a> {
    tag: &'a str,
    prefix: &'a str,
    source: &'a dyn Source,
}

impl Loader<'static> {
    /// Reads the process environment with the default tag and no prefix.
    pub fn new() -> Self {
        Self {
            tag: DEFAULT_TAG,
            prefix: "",
            source: &ProcessEnv,
        }
    }
}

impl Default for Loader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Loader<'a> {
    /// Read the field tags named `tag`. An empty name selects [`DEFAULT_TAG`].
    pub fn tag<'b>(self, tag: &'b str) -> Loader<'b>
    where
        'a: 'b,
    {
        Loader {
            tag: if tag.is_empty() { DEFAULT_TAG } else { tag },
            prefix: self.prefix,
            source: self.source,
        }
    }

    /// Prepend `prefix` to every variable name taken from a tag.
    pub fn prefix<'b>(self, prefix: &'b str) -> Loader<'b>
    where
        'a: 'b,
    {
        Loader {
            tag: self.tag,
            prefix,
            source: self.source,
        }
    }

    /// Read values from `source` instead of the process environment.
    pub fn source<'b>(self, source: &'b dyn Source) -> Loader<'b>
    where
        'a: 'b,
    {
        Loader {
            tag: self.tag,
            prefix: self.prefix,
            source,
        }
    }

    /// Tag name this loader reads.
    pub fn tag_name(&self) -> &str {
        self.tag
    }

    /// Populate `target` in place.
    ///
    /// Returns every failure encountered; an empty list means every tagged
    /// field was assigned. If `target` is not a mutable reference to a
    /// record, the single validation error is returned and nothing is read.
    pub fn load<T: Target>(&self, mut target: T) -> Vec<LoadError> {
        let record = match target.as_record() {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!(error = %err, "rejected configuration target");
                return vec![err];
            }
        };

        let mut scanner = Scanner::new(self.tag, self.prefix, self.source);
        record.scan(&mut scanner);
        let errors = scanner.finish();
        tracing::debug!(
            tag = self.tag,
            errors = errors.len(),
            "loaded configuration from environment"
        );
        errors
    }

    /// Like [`load`](Self::load), but fails if any error was collected.
    ///
    /// # Errors
    ///
    /// Returns every collected [`LoadError`] wrapped in [`LoadErrors`].
    pub fn try_load<T: Target>(&self, target: T) -> Result<(), LoadErrors> {
        LoadErrors::check(self.load(target))
    }

    /// Start from `R::default()` and populate it.
    ///
    /// # Errors
    ///
    /// Returns every collected [`LoadError`] wrapped in [`LoadErrors`].
    pub fn build<R: Record + Default>(&self) -> Result<R, LoadErrors> {
        let mut record = R::default();
        let mut scanner = Scanner::new(self.tag, self.prefix, self.source);
        record.scan(&mut scanner);
        LoadErrors::check(scanner.finish())?;
        Ok(record)
    }
}

impl fmt::Debug for Loader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("tag", &self.tag)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// Populate `target` from the process environment using the `env` tag.
pub fn load_env<T: Target>(target: T) -> Vec<LoadError> {
    Loader::new().load(target)
}

/// Populate `target` from the process environment using `tag`.
///
/// `None` or an empty tag selects [`DEFAULT_TAG`].
pub fn load_env_from_tag<T: Target>(target: T, tag: Option<&str>) -> Vec<LoadError> {
    Loader::new().tag(tag.unwrap_or(DEFAULT_TAG)).load(target)
}

/// Like [`load_env`], but fails if any error was collected.
///
/// # Errors
///
/// Returns every collected [`LoadError`] wrapped in [`LoadErrors`].
pub fn try_load_env<T: Target>(target: T) -> Result<(), LoadErrors> {
    Loader::new().try_load(target)
}
