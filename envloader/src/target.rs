//! Validation of what a caller hands to the loader

use std::time::Duration;

use chrono::TimeDelta;

use crate::error::LoadError;
use crate::scan::Record;

/// Something passed to [`Loader::load`](crate::Loader::load).
///
/// Only `&mut R` for a record `R` is accepted. `#[derive(Record)]` also
/// implements this for `R` and `&R`, so passing a record by value or by
/// shared reference is reported as [`LoadError::NotAPointer`] instead of
/// silently populating a copy. References to scalar types are reported as
/// [`LoadError::NotAStruct`].
pub trait Target {
    /// Returns the record to populate, or why this target cannot be one.
    fn as_record(&mut self) -> Result<&mut dyn Record, LoadError>;
}

macro_rules! impl_scalar_target {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Target for $ty {
                fn as_record(&mut self) -> Result<&mut dyn Record, LoadError> {
                    Err(LoadError::not_a_pointer::<Self>())
                }
            }

            impl Target for &mut $ty {
                fn as_record(&mut self) -> Result<&mut dyn Record, LoadError> {
                    Err(LoadError::not_a_struct::<Self>())
                }
            }
        )*
    };
}

impl_scalar_target!(
    String,
    &str,
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    Duration,
    TimeDelta,
    Vec<String>,
);
