//! Deployment configuration.
//!
//! The environment mode (development, production, test) selects which SQLite
//! file the service persists to. Each mode gets its own file so the three
//! never share data. Configuration is resolved once at startup and handed to
//! the storage adapter.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use miette::Diagnostic;
use thiserror::Error;

/// Image used when a notification is created without an `image_url`.
pub const DEFAULT_IMAGE_URL: &str =
    "https://cdn3.iconfinder.com/data/icons/internet-and-web-4/78/internt_web_technology-13-512.png";

/// Environment variable selecting the deployment mode.
pub const ENV_VAR: &str = "NOTIFICATIONS_ENV";
/// Environment variable overriding the data directory.
pub const DATA_DIR_VAR: &str = "NOTIFICATIONS_DATA_DIR";
/// Environment variable pointing at an explicit database file.
pub const DB_PATH_VAR: &str = "NOTIFICATIONS_DB";
/// Environment variable overriding the default image URL.
pub const DEFAULT_IMAGE_URL_VAR: &str = "NOTIFICATIONS_DEFAULT_IMAGE_URL";

#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown environment '{value}'")]
    #[diagnostic(
        code(notifications::config::unknown_environment),
        help("Use one of: development, production, test")
    )]
    UnknownEnvironment { value: String },
}

/// Deployment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    /// Database file used by this mode.
    pub fn database_file_name(self) -> &'static str {
        match self {
            Environment::Development => "notification.sqlite3",
            Environment::Production => "notification.production.sqlite3",
            Environment::Test => "notification-test.sqlite3",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        };
        f.write_str(name)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            _ => Err(ConfigError::UnknownEnvironment {
                value: s.to_string(),
            }),
        }
    }
}

/// Storage configuration injected into the SQLite adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub environment: Environment,
    /// Directory holding the per-environment database files.
    pub data_dir: PathBuf,
    /// Explicit database file, bypassing the per-environment file name.
    pub db_path: Option<PathBuf>,
    pub default_image_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            data_dir: default_data_dir(),
            db_path: None,
            default_image_url: DEFAULT_IMAGE_URL.to_string(),
        }
    }
}

impl StorageConfig {
    /// Build configuration from the environment, falling back to defaults.
    ///
    /// Reads `NOTIFICATIONS_ENV`, `NOTIFICATIONS_DATA_DIR`, `NOTIFICATIONS_DB`
    /// and `NOTIFICATIONS_DEFAULT_IMAGE_URL`. CLI flags are applied on top via
    /// the `with_*` builders.
    pub fn new() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = env::var(ENV_VAR) {
            config.environment = value.parse()?;
        }
        if let Ok(dir) = env::var(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(path) = env::var(DB_PATH_VAR) {
            config.db_path = Some(PathBuf::from(path));
        }
        if let Ok(url) = env::var(DEFAULT_IMAGE_URL_VAR)
            && !url.trim().is_empty()
        {
            config.default_image_url = url;
        }

        Ok(config)
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    pub fn with_db_path(mut self, db_path: PathBuf) -> Self {
        self.db_path = Some(db_path);
        self
    }

    pub fn with_default_image_url(mut self, url: impl Into<String>) -> Self {
        self.default_image_url = url.into();
        self
    }

    /// Resolved database file path.
    pub fn database_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(self.environment.database_file_name()))
    }
}

/// XDG data directory for the service: `~/.local/share/notifications`.
///
/// Falls back to the working directory when neither `XDG_DATA_HOME` nor
/// `HOME` is set.
pub fn default_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".local/share")));

    match data_home {
        Ok(base) => base.join("notifications"),
        Err(_) => PathBuf::from("."),
    }
}
