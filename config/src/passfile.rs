//! Password file ("orapass") lookup.
//!
//! Each non-comment line maps connection coordinates to a password:
//!
//! ```text
//! # host:port:database:username:password
//! dbhost:1521:ORCL:scott:tiger
//! *:*:ORCL:*:shared-secret
//! ```
//!
//! A `*` in any of the first four fields matches anything. Host, database
//! and username compare case-insensitively. The first matching line wins,
//! and the password is everything after the fourth `:`, so it may itself
//! contain colons.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Environment variable naming the password file.
pub const PASSWORD_FILE_ENV: &str = "ORAPASS_FILE";

/// Password file name looked up in the home directory.
pub const DEFAULT_PASSWORD_FILE: &str = ".orapass";

const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
struct PasswordEntry {
    host: String,
    port: String,
    database: String,
    username: String,
    password: String,
}

impl PasswordEntry {
    fn matches(&self, host: &str, port: u16, database: &str, username: &str) -> bool {
        fn field_matches(pattern: &str, value: &str) -> bool {
            pattern == WILDCARD || pattern.eq_ignore_ascii_case(value)
        }

        field_matches(&self.host, host)
            && (self.port == WILDCARD || self.port == port.to_string())
            && field_matches(&self.database, database)
            && field_matches(&self.username, username)
    }
}

/// Parsed password file.
///
/// # Examples
///
/// ```
/// use oradex_config::PasswordFile;
///
/// let file = PasswordFile::parse("# comment\ndbhost:1521:ORCL:scott:ti:ger\n").unwrap();
/// assert_eq!(file.lookup("DBHOST", 1521, "orcl", "SCOTT"), Some("ti:ger"));
/// assert_eq!(file.lookup("dbhost", 1522, "ORCL", "scott"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PasswordFile {
    entries: Vec<PasswordEntry>,
}

impl PasswordFile {
    /// Parses password file content.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPasswordFile`](ConfigError::InvalidPasswordFile) for
    /// a line with fewer than five fields.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_from(raw, Path::new("<memory>"))
    }

    /// Reads and parses a password file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::parse_from(&raw, path)
    }

    fn parse_from(raw: &str, path: &Path) -> Result<Self> {
        let mut entries = Vec::new();
        for (index, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.splitn(5, ':').collect();
            let [host, port, database, username, password] = fields[..] else {
                return Err(ConfigError::InvalidPasswordFile {
                    path: path.to_path_buf(),
                    line: index + 1,
                    reason: format!("expected 5 ':'-separated fields, found {}", fields.len()),
                });
            };

            entries.push(PasswordEntry {
                host: host.to_string(),
                port: port.to_string(),
                database: database.to_string(),
                username: username.to_string(),
                password: password.to_string(),
            });
        }
        Ok(Self { entries })
    }

    /// Number of entries in the file.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the password of the first entry matching the coordinates.
    pub fn lookup(&self, host: &str, port: u16, database: &str, username: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.matches(host, port, database, username))
            .map(|entry| entry.password.as_str())
    }
}

/// Picks the password file to read: the explicit path when given, then the
/// `ORAPASS_FILE` environment variable, then `~/.orapass`.
pub fn locate_password_file(explicit: Option<&Path>) -> Option<PathBuf> {
    let home = dirs::home_dir();
    let from_env = env::var_os(PASSWORD_FILE_ENV).map(PathBuf::from);
    choose_password_file(explicit, from_env, home)
}

fn choose_password_file(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = from_env.filter(|path| !path.as_os_str().is_empty()) {
        return Some(path);
    }
    let candidate = home?.join(DEFAULT_PASSWORD_FILE);
    debug!(path = %candidate.display(), "falling back to default password file");
    candidate.exists().then_some(candidate)
}
