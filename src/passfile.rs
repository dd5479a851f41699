//! Credential file (`.pgpass`) lookup.
//!
//! Format: one entry per line, `host:port:database:user:password`. The first
//! four fields are either a literal or the wildcard `*`. Entries are matched in
//! file order and the first full match supplies the password. Colons cannot be
//! escaped, so any line that does not split into exactly five fields is
//! skipped.
//!
//! The file is re-read on every lookup so that external rotation is picked up.
//! A missing or unreadable file simply means "no password".

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable naming an alternative credential file.
pub const PASSFILE_ENV: &str = "PGPASSFILE";

/// Credential file name inside the user's home directory.
pub const DEFAULT_PASSFILE_NAME: &str = ".pgpass";

/// Conditions absorbed during a credential scan. They are logged, never
/// returned from resolution.
#[derive(Error, Debug)]
pub enum PassFileError {
    #[error("Credential file '{path}' unavailable: {source}")]
    Unavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Malformed credential line {line}: expected 5 fields, found {fields}")]
    MalformedLine { line: usize, fields: usize },
}

/// One field pattern of a credential entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// `*`, matches any value.
    Wildcard,
    /// Exact, case-sensitive match.
    Literal(String),
}

impl Pattern {
    pub fn parse(field: &str) -> Self {
        if field == "*" {
            Self::Wildcard
        } else {
            Self::Literal(field.to_string())
        }
    }

    pub fn matches(&self, target: &str) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Literal(literal) => literal == target,
        }
    }
}

/// A parsed credential line.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialEntry {
    pub host: Pattern,
    pub port: Pattern,
    pub database: Pattern,
    pub user: Pattern,
    password: String,
}

impl CredentialEntry {
    /// Parse one line, without its terminator.
    ///
    /// `line` is the 1-based line number used in the error.
    pub fn parse(text: &str, line: usize) -> Result<Self, PassFileError> {
        let fields: Vec<&str> = text.split(':').collect();
        let [host, port, database, user, password] = fields.as_slice() else {
            return Err(PassFileError::MalformedLine {
                line,
                fields: fields.len(),
            });
        };

        Ok(Self {
            host: Pattern::parse(host),
            port: Pattern::parse(port),
            database: Pattern::parse(database),
            user: Pattern::parse(user),
            password: password.to_string(),
        })
    }

    /// Whether every pattern matches. The port is compared in its decimal
    /// string form, so a non-numeric port field never matches.
    pub fn matches(&self, host: &str, port: u16, database: &str, user: &str) -> bool {
        self.host.matches(host)
            && self.port.matches(&port.to_string())
            && self.database.matches(database)
            && self.user.matches(user)
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Scan credential file content for the first entry matching the target.
///
/// Malformed lines are skipped; blank lines are skipped silently.
pub fn find_password(
    content: &str,
    host: &str,
    port: u16,
    database: &str,
    user: &str,
) -> Option<String> {
    // `lines` strips exactly one "\n" or "\r\n" terminator per line.
    for (idx, text) in content.lines().enumerate() {
        if text.is_empty() {
            continue;
        }
        match CredentialEntry::parse(text, idx + 1) {
            Ok(entry) => {
                if entry.matches(host, port, database, user) {
                    tracing::debug!(line = idx + 1, "credential file entry matched");
                    return Some(entry.password);
                }
            }
            Err(e) => tracing::debug!("skipping credential line: {}", e),
        }
    }
    None
}

/// Location of a credential file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassFile {
    path: PathBuf,
}

impl PassFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The conventional credential file for this process.
    ///
    /// `$PGPASSFILE` if set and non-empty, otherwise `~/.pgpass`. Returns
    /// `None` when no home directory can be determined.
    pub fn locate() -> Option<Self> {
        if let Some(path) = std::env::var_os(PASSFILE_ENV).filter(|p| !p.is_empty()) {
            return Some(Self::new(path));
        }
        home::home_dir().map(|home| Self::new(home.join(DEFAULT_PASSFILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file content, decoding invalid UTF-8 lossily.
    pub fn read(&self) -> Result<String, PassFileError> {
        let bytes = fs::read(&self.path).map_err(|source| PassFileError::Unavailable {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Find the password for the given target, or `None` when the file is
    /// unavailable or nothing matches.
    pub fn lookup(&self, host: &str, port: u16, database: &str, user: &str) -> Option<String> {
        match self.read() {
            Ok(content) => find_password(&content, host, port, database, user),
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        }
    }
}
