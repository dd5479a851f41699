//! Connection parameter resolution.
//!
//! Host, port, database and user are each looked up through an ordered list
//! of sources, first hit wins:
//!
//! 1. caller overrides (exact lower-case key, `pghost`)
//! 2. process environment (upper-cased key, `PGHOST`)
//! 3. injected [`Settings`] (case-insensitive key)
//! 4. any source appended with [`ParamResolver::with_source`]
//!
//! Once all four are known the password comes from an explicit override or,
//! failing that, the credential file. The environment and settings tiers are
//! never consulted for it.

mod sources;

pub use sources::{EnvSource, ParamSource};

use crate::config::{ConfigError, Settings};
use crate::params::{ConnectionParams, DEFAULT_KEY_PREFIX, Overrides, Param};
use crate::passfile::PassFile;

/// Where the resolver looks for the credential file.
#[derive(Debug, Clone)]
enum PassFileSetting {
    /// `PassFile::locate()` at resolve time.
    Conventional,
    Fixed(PassFile),
    Disabled,
}

/// Resolves [`ConnectionParams`] from layered sources.
///
/// Holds no per-call state; every [`resolve`](Self::resolve) is independent.
pub struct ParamResolver {
    sources: Vec<Box<dyn ParamSource>>,
    passfile: PassFileSetting,
    key_prefix: String,
}

impl ParamResolver {
    /// The standard chain: environment, then `settings`.
    pub fn new(settings: Settings) -> Self {
        Self::empty().with_source(EnvSource).with_source(settings)
    }

    /// A resolver that only consults overrides (and the credential file).
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
            passfile: PassFileSetting::Conventional,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Append a source below all existing ones.
    pub fn with_source(mut self, source: impl ParamSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Use this credential file instead of the conventional location.
    pub fn with_passfile(mut self, passfile: PassFile) -> Self {
        self.passfile = PassFileSetting::Fixed(passfile);
        self
    }

    /// Skip the credential file entirely.
    pub fn without_passfile(mut self) -> Self {
        self.passfile = PassFileSetting::Disabled;
        self
    }

    /// Change the key prefix (`"pg"` by default). An empty prefix gives plain
    /// `host`/`HOST` keys.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Look up an arbitrary lower-case key through overrides and all sources.
    pub fn lookup(&self, overrides: &Overrides, key: &str) -> Option<String> {
        if let Some(value) = overrides.lookup(key) {
            return Some(traced(overrides, key, value));
        }
        self.sources
            .iter()
            .find_map(|source| source.lookup(key).map(|value| traced(&**source, key, value)))
    }

    fn lookup_param(&self, overrides: &Overrides, param: Param) -> Option<String> {
        self.lookup(overrides, &param.key(&self.key_prefix))
    }

    /// Resolve parameters for one connection attempt.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingParams`] naming every required key no source
    ///   could supply
    /// - [`ConfigError::InvalidPort`] when the port is not an integer in
    ///   `0..=65535`
    pub fn resolve(&self, overrides: &Overrides) -> Result<ConnectionParams, ConfigError> {
        let [host, port, database, user] =
            Param::REQUIRED.map(|param| self.lookup_param(overrides, param));

        let (Some(host), Some(port), Some(database), Some(user)) = (&host, &port, &database, &user)
        else {
            let found = [host.is_some(), port.is_some(), database.is_some(), user.is_some()];
            let missing = Param::REQUIRED
                .iter()
                .zip(found)
                .filter(|(_, found)| !found)
                .map(|(param, _)| param.key(&self.key_prefix))
                .collect();
            return Err(ConfigError::MissingParams { missing });
        };

        let port = parse_port(&Param::Port.key(&self.key_prefix), port)?;

        let password = overrides
            .get(&Param::Password.key(&self.key_prefix))
            .map(str::to_string)
            .or_else(|| self.passfile_password(host, port, database, user));

        tracing::debug!(
            host = %host,
            port,
            database = %database,
            user = %user,
            has_password = password.is_some(),
            "connection parameters resolved"
        );

        Ok(ConnectionParams::new(
            host.as_str(),
            port,
            database.as_str(),
            user.as_str(),
            password,
        ))
    }

    fn passfile_password(&self, host: &str, port: u16, database: &str, user: &str) -> Option<String> {
        let passfile = match &self.passfile {
            PassFileSetting::Conventional => PassFile::locate()?,
            PassFileSetting::Fixed(passfile) => passfile.clone(),
            PassFileSetting::Disabled => return None,
        };
        passfile.lookup(host, port, database, user)
    }
}

impl Default for ParamResolver {
    fn default() -> Self {
        Self::new(Settings::new())
    }
}

fn traced(source: &dyn ParamSource, key: &str, value: String) -> String {
    tracing::debug!(key, source = source.name(), "resolved key");
    value
}

fn parse_port(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidPort {
        key: key.to_string(),
        value: value.to_string(),
    })
}
