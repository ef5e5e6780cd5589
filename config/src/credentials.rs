//! Turning flags, environment and configuration into login credentials.

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::config::ConnectionConfig;
use crate::error::{ConfigError, Result};
use crate::passfile::{PasswordFile, locate_password_file};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 1521;

/// Connection coordinates as given on the command line.
///
/// `None` means "not given"; [`merge`](Self::merge) fills the gaps from the
/// configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password_file: Option<PathBuf>,
}

/// Everything needed to open a session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub connect_string: String,
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("connect_string", &self.connect_string)
            .finish()
    }
}

impl ConnectionSettings {
    /// Fills unset fields from `config`. Values already set win.
    pub fn merge(mut self, config: &ConnectionConfig) -> Self {
        self.host = self.host.or_else(|| config.host.clone());
        self.port = self.port.or(config.port);
        self.database = self.database.or_else(|| config.database.clone());
        self.username = self.username.or_else(|| config.username.clone());
        self.password_file = self.password_file.or_else(|| config.password_file.clone());
        self
    }

    /// Builds the connect string: EZConnect when a host was given,
    /// otherwise the database name as a TNS alias.
    ///
    /// # Examples
    ///
    /// ```
    /// use oradex_config::ConnectionSettings;
    ///
    /// let mut settings = ConnectionSettings {
    ///     database: Some("ORCL".into()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(settings.connect_string().unwrap(), "ORCL");
    ///
    /// settings.host = Some("dbhost".into());
    /// assert_eq!(settings.connect_string().unwrap(), "//dbhost:1521/ORCL");
    /// ```
    pub fn connect_string(&self) -> Result<String> {
        let database = self.database()?;
        Ok(match &self.host {
            Some(host) => format!("//{host}:{}/{database}", self.port()),
            None => database.to_string(),
        })
    }

    /// Resolves the password through the password file and returns the
    /// full credentials.
    ///
    /// # Errors
    ///
    /// Returns [`MissingDatabase`](ConfigError::MissingDatabase) when no
    /// database is known, [`PasswordNotFound`](ConfigError::PasswordNotFound)
    /// when no password file exists or none of its lines match, and I/O or
    /// parse errors from reading the file.
    pub fn resolve(&self) -> Result<Credentials> {
        let username = self.username();
        let path = locate_password_file(self.password_file.as_deref());
        let passwords = match &path {
            Some(path) => {
                debug!(path = %path.display(), "reading password file");
                PasswordFile::load(path)?
            }
            None => PasswordFile::default(),
        };
        self.resolve_with(&passwords, username)
    }

    fn resolve_with(&self, passwords: &PasswordFile, username: String) -> Result<Credentials> {
        let database = self.database()?;
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.port();

        let password = passwords
            .lookup(host, port, database, &username)
            .ok_or_else(|| ConfigError::PasswordNotFound {
                host: host.to_string(),
                port,
                database: database.to_string(),
                username: username.clone(),
            })?
            .to_string();

        Ok(Credentials {
            connect_string: self.connect_string()?,
            username,
            password,
        })
    }

    fn database(&self) -> Result<&str> {
        self.database
            .as_deref()
            .filter(|db| !db.is_empty())
            .ok_or(ConfigError::MissingDatabase)
    }

    fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    fn username(&self) -> String {
        self.username
            .clone()
            .or_else(os_user)
            .unwrap_or_default()
    }
}

fn os_user() -> Option<String> {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .ok()
        .filter(|user| !user.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ConnectionSettings {
        ConnectionSettings {
            database: Some("ORCL".to_string()),
            username: Some("scott".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_prefers_command_line() {
        let config = ConnectionConfig {
            host: Some("cfghost".to_string()),
            port: Some(1600),
            database: Some("CFGDB".to_string()),
            username: None,
            password_file: Some(PathBuf::from("/etc/orapass")),
        };
        let merged = settings().merge(&config);
        assert_eq!(merged.host.as_deref(), Some("cfghost"));
        assert_eq!(merged.port, Some(1600));
        assert_eq!(merged.database.as_deref(), Some("ORCL"));
        assert_eq!(merged.username.as_deref(), Some("scott"));
        assert_eq!(merged.password_file, Some(PathBuf::from("/etc/orapass")));
    }

    #[test]
    fn test_connect_string_requires_database() {
        let err = ConnectionSettings::default().connect_string().unwrap_err();
        assert!(matches!(err, ConfigError::MissingDatabase));
    }

    #[test]
    fn test_resolve_uses_default_host_for_lookup() {
        let passwords = PasswordFile::parse("localhost:1521:orcl:SCOTT:tiger\n").unwrap();
        let creds = settings()
            .resolve_with(&passwords, "scott".to_string())
            .unwrap();
        assert_eq!(creds.password, "tiger");
        assert_eq!(creds.connect_string, "ORCL");
    }

    #[test]
    fn test_resolve_ezconnect() {
        let passwords = PasswordFile::parse("dbhost:1522:ORCL:scott:tiger\n").unwrap();
        let mut settings = settings();
        settings.host = Some("dbhost".to_string());
        settings.port = Some(1522);
        let creds = settings
            .resolve_with(&passwords, "scott".to_string())
            .unwrap();
        assert_eq!(creds.connect_string, "//dbhost:1522/ORCL");
    }

    #[test]
    fn test_resolve_missing_password() {
        let passwords = PasswordFile::parse("dbhost:1521:ORCL:scott:tiger\n").unwrap();
        let err = settings()
            .resolve_with(&passwords, "scott".to_string())
            .unwrap_err();
        assert!(matches!(err, ConfigError::PasswordNotFound { port: 1521, .. }));
    }

    #[test]
    fn test_resolve_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orapass");
        std::fs::write(&path, "*:*:ORCL:scott:from-file\n").unwrap();

        let mut settings = settings();
        settings.password_file = Some(path);
        assert_eq!(settings.resolve().unwrap().password, "from-file");
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials {
            username: "scott".to_string(),
            password: "tiger".to_string(),
            connect_string: "ORCL".to_string(),
        };
        assert!(!format!("{creds:?}").contains("tiger"));
    }
}
