//! Conversions from cleaned environment strings into field values

use std::time::Duration;

use chrono::TimeDelta;

use crate::duration::{self, DurationError};
use crate::error::{ParseBoolError, ParseError};

/// A field type that can be read from a single environment variable.
///
/// The input has already been trimmed and had one layer of surrounding
/// double quotes removed.
pub trait FromEnvStr: Sized {
    /// Convert the cleaned value into `Self`.
    fn from_env_str(value: &str) -> Result<Self, ParseError>;
}

impl FromEnvStr for String {
    fn from_env_str(value: &str) -> Result<Self, ParseError> {
        Ok(value.to_string())
    }
}

impl FromEnvStr for bool {
    fn from_env_str(value: &str) -> Result<Self, ParseError> {
        match value {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ParseBoolError {
                literal: value.to_string(),
            }
            .into()),
        }
    }
}

macro_rules! impl_from_env_str_via_parse {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromEnvStr for $ty {
                fn from_env_str(value: &str) -> Result<Self, ParseError> {
                    value.parse::<$ty>().map_err(ParseError::from)
                }
            }
        )*
    };
}

impl_from_env_str_via_parse!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Signed nanoseconds of a unit-suffixed literal, or of a bare integer read
/// as whole seconds.
fn duration_nanos(value: &str) -> Result<i64, DurationError> {
    match duration::parse_nanos(value) {
        Err(DurationError::MissingUnit { .. }) => duration::parse_bare_seconds(value),
        parsed => parsed,
    }
}

/// Non-negative span; `-1m` and `-10` are rejected as negative.
impl FromEnvStr for Duration {
    fn from_env_str(value: &str) -> Result<Self, ParseError> {
        duration_nanos(value)
            .and_then(|nanos| duration::non_negative(nanos, value))
            .map_err(ParseError::from)
    }
}

/// Signed span; `-1m` and `-10` are accepted.
impl FromEnvStr for TimeDelta {
    fn from_env_str(value: &str) -> Result<Self, ParseError> {
        duration_nanos(value)
            .map(TimeDelta::nanoseconds)
            .map_err(ParseError::from)
    }
}

/// Comma-separated list; each element is trimmed, no further escaping.
///
/// Only the empty string is an empty list: `","` is two empty elements.
impl FromEnvStr for Vec<String> {
    fn from_env_str(value: &str) -> Result<Self, ParseError> {
        if value.is_empty() {
            return Ok(Vec::new());
        }
        Ok(value.split(',').map(|item| item.trim().to_string()).collect())
    }
}

/// Trim whitespace, then strip at most one leading and one trailing `"`.
pub(crate) fn clean(raw: &str) -> &str {
    let value = raw.trim();
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}
