//! Error types for loading configuration from environment variables

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use crate::duration::DurationError;

/// Classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The target was passed by value or by shared reference.
    NotAPointer,
    /// The target is a mutable reference to something that is not a record.
    NotAStruct,
    /// A tagged field's variable is not present in the environment.
    EnvVarNotFound,
    /// A tagged field's variable holds a value that is not valid Unicode.
    NotUnicode,
    /// A tagged field has a type that cannot be read from a string.
    UnsupportedType,
    /// A value was present but could not be converted to the field's type.
    ParseFailure,
}

/// Errors that can occur when populating a record from the environment.
///
/// Validation errors (`NotAPointer`, `NotAStruct`) are returned alone and
/// leave the target untouched. Every other variant is reported per field;
/// the remaining fields are still visited.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The target is not a mutable reference, so changes would be lost.
    #[error("the provided configuration needs to be a mutable reference, got {type_name}")]
    NotAPointer {
        /// Type name of the rejected target
        type_name: &'static str,
    },

    /// The target does not refer to a record type.
    #[error("the provided configuration needs to be a struct, got {type_name}")]
    NotAStruct {
        /// Type name of the rejected target
        type_name: &'static str,
    },

    /// Environment variable named by a field tag is not set.
    #[error("environment did not contain wanted var '{name}' for field '{field}'")]
    EnvVarNotFound {
        /// Dotted path of the field within the record
        field: String,
        /// Name of the missing environment variable
        name: String,
    },

    /// Environment variable is set but its value is not valid Unicode.
    #[error("environment variable '{name}' for field '{field}' is not valid unicode")]
    NotUnicode {
        /// Dotted path of the field within the record
        field: String,
        /// Name of the environment variable
        name: String,
    },

    /// Field is tagged but its type has no string conversion.
    #[error("field '{field}' has unsupported type {type_name}")]
    UnsupportedType {
        /// Dotted path of the field within the record
        field: String,
        /// Name of the environment variable the field is tagged with
        name: String,
        /// Fully qualified type name of the field
        type_name: &'static str,
    },

    /// Failed to convert the variable's value into the field's type.
    #[error("failed to parse var '{name}' with value '{value}' as {type_name}: {source}")]
    Parse {
        /// Dotted path of the field within the record
        field: String,
        /// Name of the environment variable being parsed
        name: String,
        /// Raw value read from the environment
        value: String,
        /// Fully qualified type name that parsing was attempted for
        type_name: &'static str,
        /// Error from the underlying parser
        source: ParseError,
    },
}

impl LoadError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAPointer { .. } => ErrorKind::NotAPointer,
            Self::NotAStruct { .. } => ErrorKind::NotAStruct,
            Self::EnvVarNotFound { .. } => ErrorKind::EnvVarNotFound,
            Self::NotUnicode { .. } => ErrorKind::NotUnicode,
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Self::Parse { .. } => ErrorKind::ParseFailure,
        }
    }

    /// Name of the environment variable involved, if any.
    pub fn var_name(&self) -> Option<&str> {
        match self {
            Self::NotAPointer { .. } | Self::NotAStruct { .. } => None,
            Self::EnvVarNotFound { name, .. }
            | Self::NotUnicode { name, .. }
            | Self::UnsupportedType { name, .. }
            | Self::Parse { name, .. } => Some(name),
        }
    }

    /// Dotted path of the field involved, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotAPointer { .. } | Self::NotAStruct { .. } => None,
            Self::EnvVarNotFound { field, .. }
            | Self::NotUnicode { field, .. }
            | Self::UnsupportedType { field, .. }
            | Self::Parse { field, .. } => Some(field),
        }
    }

    /// Create a not-a-pointer error (used by macro-generated code)
    #[doc(hidden)]
    pub fn not_a_pointer<T: ?Sized>() -> Self {
        Self::NotAPointer {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Create a not-a-struct error
    #[doc(hidden)]
    pub fn not_a_struct<T: ?Sized>() -> Self {
        Self::NotAStruct {
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// Failure reported by a value parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Not one of the accepted boolean literals.
    #[error(transparent)]
    Bool(#[from] ParseBoolError),

    /// Not a base-10 integer that fits the field's width.
    #[error(transparent)]
    Int(#[from] ParseIntError),

    /// Not a floating point literal.
    #[error(transparent)]
    Float(#[from] ParseFloatError),

    /// Not a duration literal or a bare number of seconds.
    #[error(transparent)]
    Duration(#[from] DurationError),
}

/// A string that is not one of `1 t T TRUE true True 0 f F FALSE false False`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid boolean literal '{literal}'")]
pub struct ParseBoolError {
    /// The rejected literal
    pub literal: String,
}

/// Every field-level error collected during one load.
///
/// Wraps the list returned by [`Loader::load`](crate::Loader::load) so it can
/// be propagated with `?`.
#[derive(Debug)]
pub struct LoadErrors(Vec<LoadError>);

impl LoadErrors {
    /// Returns `Ok(())` for an empty list, otherwise wraps it.
    pub fn check(errors: Vec<LoadError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self(errors))
        }
    }

    /// The collected errors in field order.
    pub fn errors(&self) -> &[LoadError] {
        &self.0
    }

    /// Number of collected errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no errors were collected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwraps into the underlying list.
    pub fn into_vec(self) -> Vec<LoadError> {
        self.0
    }
}

impl fmt::Display for LoadErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "failed to load configuration: {single}"),
            errors => {
                write!(f, "failed to load configuration ({} errors)", errors.len())?;
                for error in errors {
                    write!(f, "\n  - {error}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LoadErrors {}

impl IntoIterator for LoadErrors {
    type Item = LoadError;
    type IntoIter = std::vec::IntoIter<LoadError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LoadErrors {
    type Item = &'a LoadError;
    type IntoIter = std::slice::Iter<'a, LoadError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(name: &str) -> LoadError {
        LoadError::EnvVarNotFound {
            field: name.to_lowercase(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_kind_and_accessors() {
        let err = missing("PORT");
        assert_eq!(err.kind(), ErrorKind::EnvVarNotFound);
        assert_eq!(err.var_name(), Some("PORT"));
        assert_eq!(err.field(), Some("port"));

        let err = LoadError::not_a_pointer::<u32>();
        assert_eq!(err.kind(), ErrorKind::NotAPointer);
        assert_eq!(err.var_name(), None);
        assert!(err.to_string().contains("u32"));
    }

    #[test]
    fn test_parse_error_message_contains_context() {
        let source = "x".parse::<u16>().unwrap_err();
        let err = LoadError::Parse {
            field: "port".to_string(),
            name: "PORT".to_string(),
            value: "x".to_string(),
            type_name: "u16",
            source: source.into(),
        };
        let message = err.to_string();
        assert!(message.contains("'PORT'"));
        assert!(message.contains("'x'"));
        assert!(message.contains("u16"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_check_empty_is_ok() {
        assert!(LoadErrors::check(Vec::new()).is_ok());
    }

    #[test]
    fn test_display_lists_every_error() {
        let errors = LoadErrors::check(vec![missing("A"), missing("B")]).unwrap_err();
        assert_eq!(errors.len(), 2);
        let message = errors.to_string();
        assert!(message.starts_with("failed to load configuration (2 errors)"));
        assert!(message.contains("'A'"));
        assert!(message.contains("'B'"));
    }

    #[test]
    fn test_display_single_error_inline() {
        let errors = LoadErrors::check(vec![missing("A")]).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "failed to load configuration: environment did not contain wanted var 'A' for field 'a'"
        );
    }
}
