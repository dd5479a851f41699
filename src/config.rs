//! Settings file handling and configuration errors.
//!
//! `Settings` is the lowest-priority built-in lookup tier. It is loaded from a
//! flat JSON object and passed to the resolver explicitly:
//!
//! ```json
//! {
//!     "PGHOST": "db.example.org",
//!     "PGPORT": 5432,
//!     "PGDATABASE": "gutenberg",
//!     "PGUSER": "reader",
//!     "PGVPNCMD": "sudo systemctl start openvpn@office"
//! }
//! ```
//!
//! Key lookup is case-insensitive.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Default settings file, looked up in the current directory.
pub const DEFAULT_SETTINGS_FILE: &str = ".pg_resolve.json";

/// Environment variable naming an explicit settings file.
pub const SETTINGS_PATH_ENV: &str = "PG_RESOLVE_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing connection parameter(s): {}", .missing.join(", "))]
    MissingParams { missing: Vec<String> },

    #[error("Invalid port '{value}' for {key}: expected an integer between 0 and 65535")]
    InvalidPort { key: String, value: String },

    #[error("Failed to read settings file '{path}': {message}")]
    SettingsRead { path: String, message: String },

    #[error("Invalid settings file '{path}': {message}")]
    SettingsParse { path: String, message: String },
}

/// Application settings consulted after overrides and the environment.
#[derive(Clone, Default)]
pub struct Settings {
    values: BTreeMap<String, Value>,
}

impl Settings {
    /// Empty settings; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful in tests and embedding applications.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Load settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::SettingsRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Parse settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::parse(json, "<inline>")
    }

    fn parse(json: &str, origin: &str) -> Result<Self, ConfigError> {
        let values: BTreeMap<String, Value> =
            serde_json::from_str(json).map_err(|e| ConfigError::SettingsParse {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { values })
    }

    /// Locate and load the settings file for this process.
    ///
    /// Priority: `$PG_RESOLVE_CONFIG` > `./.pg_resolve.json` > empty settings.
    /// A file named by the environment variable must exist; the default file
    /// is optional.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
            return Self::load(Path::new(&path));
        }

        let default_path = PathBuf::from(DEFAULT_SETTINGS_FILE);
        if default_path.exists() {
            return Self::load(&default_path);
        }

        tracing::debug!("no settings file found, using empty settings");
        Ok(Self::new())
    }

    /// Look up a key case-insensitively, rendering scalars as strings.
    ///
    /// An exact-case key wins over other spellings. `null`, arrays and objects
    /// count as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = self.values.get(key).or_else(|| {
            self.values
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })?;

        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// Values may hold secrets; only keys are printed.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    fn test_get_case_insensitive() {
        let settings = Settings::from_json_str(r#"{"PGHOST": "db.example.org"}"#).unwrap();
        assert_eq!(settings.get("pghost"), Some("db.example.org".to_string()));
        assert_eq!(settings.get("PgHost"), Some("db.example.org".to_string()));
    }

    #[rstest]
    fn test_get_prefers_exact_case() {
        let settings = Settings::new().with("PGHOST", "upper").with("pghost", "lower");
        assert_eq!(settings.get("pghost"), Some("lower".to_string()));
        assert_eq!(settings.get("PGHOST"), Some("upper".to_string()));
    }

    #[rstest]
    fn test_get_renders_numbers() {
        let settings = Settings::from_json_str(r#"{"PGPORT": 5432}"#).unwrap();
        assert_eq!(settings.get("pgport"), Some("5432".to_string()));
    }

    #[rstest]
    #[case(r#"{"PGHOST": null}"#)]
    #[case(r#"{"PGHOST": ["a"]}"#)]
    #[case(r#"{"PGHOST": {"a": 1}}"#)]
    #[case(r#"{}"#)]
    fn test_get_non_scalar_is_absent(#[case] json: &str) {
        let settings = Settings::from_json_str(json).unwrap();
        assert_eq!(settings.get("pghost"), None);
    }

    #[rstest]
    fn test_from_json_str_rejects_non_object() {
        let result = Settings::from_json_str("[1, 2, 3]");
        assert!(matches!(result, Err(ConfigError::SettingsParse { .. })));
    }

    #[rstest]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::SettingsRead { .. })));
    }

    #[rstest]
    fn test_load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"PGUSER": "reader"}}"#).unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.get("pguser"), Some("reader".to_string()));
    }

    #[rstest]
    fn test_debug_hides_values() {
        let settings = Settings::new().with("PGPASSWORD", "hunter2");
        let rendered = format!("{:?}", settings);
        assert!(rendered.contains("PGPASSWORD"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    #[serial]
    fn test_discover_from_env_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"PGDATABASE": "from_env_file"}}"#).unwrap();
        unsafe {
            std::env::set_var(SETTINGS_PATH_ENV, file.path());
        }
        let result = Settings::discover();
        unsafe {
            std::env::remove_var(SETTINGS_PATH_ENV);
        }
        let settings = result.unwrap();
        assert_eq!(settings.get("pgdatabase"), Some("from_env_file".to_string()));
    }

    #[test]
    #[serial]
    fn test_discover_env_path_must_exist() {
        unsafe {
            std::env::set_var(SETTINGS_PATH_ENV, "/nonexistent/pg_resolve.json");
        }
        let result = Settings::discover();
        unsafe {
            std::env::remove_var(SETTINGS_PATH_ENV);
        }
        assert!(matches!(result, Err(ConfigError::SettingsRead { .. })));
    }

    #[test]
    #[serial]
    fn test_discover_default_file_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(DEFAULT_SETTINGS_FILE),
            r#"{"PGHOST": "from_default_file"}"#,
        )
        .unwrap();

        let old_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();
        unsafe {
            std::env::remove_var(SETTINGS_PATH_ENV);
        }
        let result = Settings::discover();
        std::env::set_current_dir(old_dir).unwrap();

        let settings = result.unwrap();
        assert_eq!(settings.get("pghost"), Some("from_default_file".to_string()));
    }

    #[test]
    #[serial]
    fn test_discover_without_any_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let old_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();
        unsafe {
            std::env::remove_var(SETTINGS_PATH_ENV);
        }
        let result = Settings::discover();
        std::env::set_current_dir(old_dir).unwrap();

        assert!(result.unwrap().is_empty());
    }
}
