//! Where variable values are read from

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::ffi::OsString;
use std::hash::BuildHasher;

/// A read-only mapping from variable name to raw value.
///
/// Lookups are by exact name. The process environment is the default
/// source; maps are useful for tests or for a snapshot captured up front.
pub trait Source {
    /// Returns the raw value of `name`, or `None` if it is not set.
    fn get(&self, name: &str) -> Option<OsString>;
}

/// The current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn get(&self, name: &str) -> Option<OsString> {
        // Names the platform cannot store are never set.
        if name.is_empty() || name.contains(['=', '\0']) {
            return None;
        }
        env::var_os(name)
    }
}

impl<S: BuildHasher> Source for HashMap<String, String, S> {
    fn get(&self, name: &str) -> Option<OsString> {
        HashMap::get(self, name).map(OsString::from)
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<OsString> {
        BTreeMap::get(self, name).map(OsString::from)
    }
}

impl<T: Source + ?Sized> Source for &T {
    fn get(&self, name: &str) -> Option<OsString> {
        (**self).get(name)
    }
}
