//! Lookup sources consulted by the resolver.

use crate::config::Settings;
use crate::params::Overrides;

/// A tier that can resolve a named connection parameter.
///
/// Keys passed to [`lookup`](ParamSource::lookup) are always lower-case
/// (`pghost`); each source maps them onto its own naming convention.
pub trait ParamSource: Send + Sync {
    /// Short name for log output.
    fn name(&self) -> &str;

    /// Value for `key`, or `None` if this source does not define it.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Exact key match.
impl ParamSource for Overrides {
    fn name(&self) -> &str {
        "overrides"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }
}

/// Process environment, keyed by the upper-cased name (`pghost` -> `PGHOST`).
///
/// A variable that is set but not valid unicode counts as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ParamSource for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key.to_uppercase()).ok()
    }
}

/// Case-insensitive match against the settings keys.
impl ParamSource for Settings {
    fn name(&self) -> &str {
        "settings"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key)
    }
}
