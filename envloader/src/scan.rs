//! Recursive population of records from tagged fields
//!
//! `#[derive(Record)]` expands to one visit per field, in declaration
//! order. Which visit runs is decided at compile time from the field's type:
//!
//! 1. the type implements [`Record`]: recurse, tags are not consulted;
//! 2. the type implements [`FromEnvStr`]: look up the tag and parse;
//! 3. anything else: skipped when untagged, `UnsupportedType` when tagged.
//!
//! The ranking is resolved by method lookup on `&&&Probe<T>`, which tries
//! the `&&Probe<T>` impl before `&Probe<T>` before `Probe<T>`.

use std::any::type_name;
use std::marker::PhantomData;

use crate::error::LoadError;
use crate::source::Source;
use crate::value::{self, FromEnvStr};

/// A structured type whose fields can be populated from the environment.
///
/// Implement with `#[derive(Record)]`.
pub trait Record {
    /// Visit every field in declaration order, recording failures on
    /// `scanner` and leaving failed fields unchanged.
    fn scan(&mut self, scanner: &mut Scanner<'_>);
}

/// Traversal state shared by every level of one load.
pub struct Scanner<'a> {
    tag: &'a str,
    prefix: &'a str,
    source: &'a dyn Source,
    path: Vec<&'static str>,
    errors: Vec<LoadError>,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(tag: &'a str, prefix: &'a str, source: &'a dyn Source) -> Self {
        Self {
            tag,
            prefix,
            source,
            path: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tag name this scan reads.
    pub fn tag(&self) -> &str {
        self.tag
    }

    pub(crate) fn finish(self) -> Vec<LoadError> {
        self.errors
    }

    fn push(&mut self, error: LoadError) {
        self.errors.push(error);
    }

    fn field_path(&self, field: &Field) -> String {
        let mut path = self.path.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(field.name);
        path
    }

    /// Variable name for `field` under the active tag, if it should be read.
    fn variable(&self, field: &Field) -> Option<String> {
        match field.tag(self.tag) {
            None => {
                tracing::trace!(field = field.name, tag = self.tag, "skipping untagged field");
                None
            }
            Some("") | Some("-") => {
                tracing::trace!(field = field.name, tag = self.tag, "skipping opted-out field");
                None
            }
            Some(name) => Some(format!("{}{}", self.prefix, name)),
        }
    }

    /// Read `name`, recording an error when it is absent or not Unicode.
    fn lookup(&mut self, field: &Field, name: &str) -> Option<String> {
        match self.source.get(name) {
            None => {
                let field = self.field_path(field);
                self.push(LoadError::EnvVarNotFound {
                    field,
                    name: name.to_string(),
                });
                None
            }
            Some(raw) => match raw.into_string() {
                Ok(raw) => Some(raw),
                Err(_) => {
                    let field = self.field_path(field);
                    self.push(LoadError::NotUnicode {
                        field,
                        name: name.to_string(),
                    });
                    None
                }
            },
        }
    }
}

/// Static description of one field, emitted by the derive.
#[doc(hidden)]
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Field identifier, or its index for tuple structs
    pub name: &'static str,
    /// `(tag name, variable name)` pairs in attribute order
    pub tags: &'static [(&'static str, &'static str)],
}

impl Field {
    fn tag(&self, tag: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(key, _)| *key == tag)
            .map(|(_, value)| *value)
    }
}

/// How one field of type `T` is populated.
#[doc(hidden)]
pub type Visit<T> = fn(&mut T, &Field, &mut Scanner<'_>);

#[doc(hidden)]
pub struct Probe<T>(PhantomData<fn() -> T>);

impl<T> Probe<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

#[doc(hidden)]
pub trait ViaRecord {
    type Slot;
    fn visitor(&self) -> Visit<Self::Slot>;
}

impl<T: Record> ViaRecord for &&Probe<T> {
    type Slot = T;

    fn visitor(&self) -> Visit<T> {
        visit_record::<T>
    }
}

#[doc(hidden)]
pub trait ViaValue {
    type Slot;
    fn visitor(&self) -> Visit<Self::Slot>;
}

impl<T: FromEnvStr> ViaValue for &Probe<T> {
    type Slot = T;

    fn visitor(&self) -> Visit<T> {
        visit_value::<T>
    }
}

#[doc(hidden)]
pub trait ViaOpaque {
    type Slot;
    fn visitor(&self) -> Visit<Self::Slot>;
}

impl<T> ViaOpaque for Probe<T> {
    type Slot = T;

    fn visitor(&self) -> Visit<T> {
        visit_opaque::<T>
    }
}

fn visit_record<T: Record>(slot: &mut T, field: &Field, scanner: &mut Scanner<'_>) {
    scanner.path.push(field.name);
    slot.scan(scanner);
    scanner.path.pop();
}

fn visit_value<T: FromEnvStr>(slot: &mut T, field: &Field, scanner: &mut Scanner<'_>) {
    let Some(name) = scanner.variable(field) else {
        return;
    };
    let Some(raw) = scanner.lookup(field, &name) else {
        return;
    };

    match T::from_env_str(value::clean(&raw)) {
        Ok(parsed) => {
            *slot = parsed;
            tracing::debug!(field = field.name, var = %name, "populated field from environment");
        }
        Err(source) => {
            let field = scanner.field_path(field);
            scanner.push(LoadError::Parse {
                field,
                name,
                value: raw,
                type_name: type_name::<T>(),
                source,
            });
        }
    }
}

fn visit_opaque<T>(_slot: &mut T, field: &Field, scanner: &mut Scanner<'_>) {
    let Some(name) = scanner.variable(field) else {
        return;
    };
    if scanner.lookup(field, &name).is_none() {
        return;
    }
    let field = scanner.field_path(field);
    scanner.push(LoadError::UnsupportedType {
        field,
        name,
        type_name: type_name::<T>(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;
    use std::time::Duration;

    // Hand-written equivalents of what the derive emits.
    #[derive(Debug, Default)]
    struct Inner {
        timeout: Duration,
    }

    impl Record for Inner {
        fn scan(&mut self, scanner: &mut Scanner<'_>) {
            const TIMEOUT: Field = Field {
                name: "timeout",
                tags: &[("env", "TIMEOUT")],
            };
            let visit = (&&&Probe::<Duration>::new()).visitor();
            visit(&mut self.timeout, &TIMEOUT, scanner);
        }
    }

    #[derive(Debug, Default)]
    struct Outer {
        port: u16,
        opaque: Option<u8>,
        inner: Inner,
    }

    impl Record for Outer {
        fn scan(&mut self, scanner: &mut Scanner<'_>) {
            const PORT: Field = Field {
                name: "port",
                tags: &[("env", "PORT"), ("alt", "-")],
            };
            const OPAQUE: Field = Field {
                name: "opaque",
                tags: &[("env", "OPAQUE")],
            };
            const INNER: Field = Field {
                name: "inner",
                tags: &[],
            };
            let visit = (&&&Probe::<u16>::new()).visitor();
            visit(&mut self.port, &PORT, scanner);
            let visit = (&&&Probe::<Option<u8>>::new()).visitor();
            visit(&mut self.opaque, &OPAQUE, scanner);
            let visit = (&&&Probe::<Inner>::new()).visitor();
            visit(&mut self.inner, &INNER, scanner);
        }
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn scan(record: &mut dyn Record, tag: &str, source: &dyn Source) -> Vec<LoadError> {
        let mut scanner = Scanner::new(tag, "", source);
        record.scan(&mut scanner);
        scanner.finish()
    }

    #[test]
    fn test_populates_values_and_nested_records() {
        let source = env(&[("PORT", "8080"), ("OPAQUE", "1"), ("TIMEOUT", "5s")]);
        let mut outer = Outer::default();
        let errors = scan(&mut outer, "env", &source);

        assert_eq!(outer.port, 8080);
        assert_eq!(outer.inner.timeout, Duration::from_secs(5));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), ErrorKind::UnsupportedType);
        assert_eq!(errors[0].field(), Some("opaque"));
        assert_eq!(outer.opaque, None);
    }

    #[test]
    fn test_missing_values_are_collected_with_paths() {
        let source = env(&[]);
        let mut outer = Outer::default();
        let errors = scan(&mut outer, "env", &source);

        let kinds: Vec<_> = errors.iter().map(LoadError::kind).collect();
        assert_eq!(kinds, vec![ErrorKind::EnvVarNotFound; 3]);
        let fields: Vec<_> = errors.iter().filter_map(LoadError::field).collect();
        assert_eq!(fields, vec!["port", "opaque", "inner.timeout"]);
    }

    #[test]
    fn test_other_tag_skips_opt_out_and_untagged() {
        let source = env(&[("PORT", "1"), ("TIMEOUT", "1s")]);
        let mut outer = Outer::default();
        let errors = scan(&mut outer, "alt", &source);

        assert!(errors.is_empty());
        assert_eq!(outer.port, 0);
        assert_eq!(outer.inner.timeout, Duration::ZERO);
    }

    #[test]
    fn test_parse_failure_leaves_field_unchanged() {
        let source = env(&[("PORT", "http"), ("OPAQUE", "1"), ("TIMEOUT", "1s")]);
        let mut outer = Outer {
            port: 42,
            ..Outer::default()
        };
        let errors = scan(&mut outer, "env", &source);

        assert_eq!(outer.port, 42);
        assert!(matches!(
            &errors[0],
            LoadError::Parse { name, value, .. } if name == "PORT" && value == "http"
        ));
    }

    #[test]
    fn test_prefix_is_prepended() {
        let source = env(&[("APP_PORT", "9"), ("APP_OPAQUE", "1"), ("APP_TIMEOUT", "9")]);
        let mut outer = Outer::default();
        let mut scanner = Scanner::new("env", "APP_", &source);
        outer.scan(&mut scanner);

        assert_eq!(scanner.finish().len(), 1);
        assert_eq!(outer.port, 9);
        assert_eq!(outer.inner.timeout, Duration::from_secs(9));
    }

    #[test]
    fn test_hand_written_record_sees_active_tag() {
        #[derive(Default)]
        struct Seen {
            tags: Vec<String>,
            inner: Inner,
        }

        impl Record for Seen {
            fn scan(&mut self, scanner: &mut Scanner<'_>) {
                self.tags.push(scanner.tag().to_string());
                const INNER: Field = Field {
                    name: "inner",
                    tags: &[],
                };
                let visit = (&&&Probe::<Inner>::new()).visitor();
                visit(&mut self.inner, &INNER, scanner);
            }
        }

        let source = env(&[]);
        let mut seen = Seen::default();
        assert!(scan(&mut seen, "testTag", &source).is_empty());
        assert_eq!(seen.tags, vec!["testTag"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_value() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        struct Raw;
        impl Source for Raw {
            fn get(&self, _name: &str) -> Option<OsString> {
                Some(OsString::from_vec(vec![0x66, 0x6f, 0x80]))
            }
        }

        let mut outer = Outer::default();
        let errors = scan(&mut outer, "env", &Raw);
        assert_eq!(errors[0].kind(), ErrorKind::NotUnicode);
        assert_eq!(errors[0].var_name(), Some("PORT"));
    }
}
