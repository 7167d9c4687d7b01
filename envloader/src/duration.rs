//! Duration literal parsing
//!
//! Accepts the same grammar as Go's `time.ParseDuration`: an optional sign
//! followed by one or more `<number><unit>` pairs such as `300ms`, `1.5h` or
//! `2h45m`. Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m` and `h`.
//!
//! Literals are read as a signed count of nanoseconds bounded by `i64`.
//! [`parse_signed`] keeps the sign; [`parse`] rejects negative spans.

use std::num::{IntErrorKind, ParseIntError};
use std::time::Duration;

use chrono::TimeDelta;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

/// Errors produced while parsing a duration literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    /// The literal is empty or not made of `<number><unit>` pairs.
    #[error("invalid duration '{input}'")]
    Invalid {
        /// The literal that failed to parse
        input: String,
    },

    /// A number was not followed by a unit suffix.
    ///
    /// This is the only variant that triggers the bare-seconds fallback
    /// when loading a `Duration` field.
    #[error("missing unit in duration '{input}'")]
    MissingUnit {
        /// The literal that failed to parse
        input: String,
    },

    /// A unit suffix was present but not recognized.
    #[error("unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit {
        /// The unrecognized suffix
        unit: String,
        /// The literal that failed to parse
        input: String,
    },

    /// The total does not fit in 64 bits of nanoseconds.
    #[error("duration '{input}' is out of range")]
    Overflow {
        /// The literal that failed to parse
        input: String,
    },

    /// The literal describes a negative span of time.
    #[error("duration '{input}' is negative")]
    Negative {
        /// The literal that failed to parse
        input: String,
    },

    /// A unitless value could not be read as a whole number of seconds.
    #[error("failed to parse '{input}' as a number of seconds: {source}")]
    BareSeconds {
        /// The literal that failed to parse
        input: String,
        /// Underlying integer parse failure
        source: ParseIntError,
    },
}

/// Parse a unit-suffixed duration literal.
///
/// `"0"` is the only literal accepted without a unit. A negative non-zero
/// literal is rejected because [`Duration`] cannot represent it.
pub fn parse(input: &str) -> Result<Duration, DurationError> {
    parse_nanos(input).and_then(|nanos| non_negative(nanos, input))
}

/// Parse a unit-suffixed duration literal, keeping its sign.
pub fn parse_signed(input: &str) -> Result<TimeDelta, DurationError> {
    parse_nanos(input).map(TimeDelta::nanoseconds)
}

/// Read a unitless literal as a signed whole number of seconds.
///
/// Returns nanoseconds, under the same `i64` bound as unit-suffixed literals.
pub fn parse_bare_seconds(input: &str) -> Result<i64, DurationError> {
    let overflow = || DurationError::Overflow {
        input: input.to_string(),
    };

    let seconds = input.parse::<i64>().map_err(|source| {
        if matches!(
            source.kind(),
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
        ) {
            return overflow();
        }
        DurationError::BareSeconds {
            input: input.to_string(),
            source,
        }
    })?;
    seconds
        .checked_mul(NANOS_PER_SECOND as i64)
        .ok_or_else(overflow)
}

/// Convert signed nanoseconds into a [`Duration`].
pub(crate) fn non_negative(nanos: i64, input: &str) -> Result<Duration, DurationError> {
    u64::try_from(nanos)
        .map(Duration::from_nanos)
        .map_err(|_| DurationError::Negative {
            input: input.to_string(),
        })
}

/// Signed nanoseconds of a unit-suffixed literal.
pub(crate) fn parse_nanos(input: &str) -> Result<i64, DurationError> {
    let invalid = || DurationError::Invalid {
        input: input.to_string(),
    };
    let overflow = || DurationError::Overflow {
        input: input.to_string(),
    };

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, after_whole, overflowed) = leading_int(rest);
        if overflowed {
            return Err(overflow());
        }
        let has_whole = after_whole.len() != rest.len();
        rest = after_whole;

        let mut fraction = 0u64;
        let mut scale = 1f64;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, digits_scale, after_fraction) = leading_fraction(after_dot);
            has_fraction = after_fraction.len() != after_dot.len();
            fraction = digits;
            scale = digits_scale;
            rest = after_fraction;
        }
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(DurationError::MissingUnit {
                input: input.to_string(),
            });
        }
        let (unit, after_unit) = rest.split_at(unit_len);
        rest = after_unit;

        let unit_nanos = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let mut value = whole.checked_mul(unit_nanos).ok_or_else(overflow)?;
        if fraction > 0 {
            // Truncates toward zero, matching the reference grammar.
            let fractional = (fraction as f64 * (unit_nanos as f64 / scale)) as u64;
            value = value.checked_add(fractional).ok_or_else(overflow)?;
        }
        total = total.checked_add(value).ok_or_else(overflow)?;
        if total > i64::MAX as u64 {
            return Err(overflow());
        }
    }

    // total <= i64::MAX was checked after every pair
    let total = total as i64;
    Ok(if negative { -total } else { total })
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Consume leading ASCII digits, reporting whether the value overflowed.
fn leading_int(s: &str) -> (u64, &str, bool) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    for digit in s[..end].bytes() {
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
        {
            Some(next) if next <= i64::MAX as u64 => value = next,
            _ => return (0, &s[end..], true),
        }
    }
    (value, &s[end..], false)
}

/// Consume fractional digits, ignoring precision that no longer fits.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    let mut scale = 1f64;
    let mut saturated = false;
    for digit in s[..end].bytes() {
        if saturated {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
        {
            Some(next) if next <= i64::MAX as u64 => {
                value = next;
                scale *= 10.0;
            }
            _ => saturated = true,
        }
    }
    (value, scale, &s[end..])
}
