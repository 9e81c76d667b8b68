//! # Server Configuration
//!
//! Loaded once at startup from `CREWBOOK_*` environment variables, then
//! read-only.
//!
//! | Variable                      | Default                              |
//! |-------------------------------|--------------------------------------|
//! | `CREWBOOK_BIND_ADDR`          | `0.0.0.0:8080`                       |
//! | `CREWBOOK_DB_PATH`            | `<platform data dir>/crewbook.db`    |
//! | `CREWBOOK_DB_MAX_CONNECTIONS` | `5`                                  |
//! | `CREWBOOK_CURRENCY_SYMBOL`    | empty (amounts printed bare)         |
//! | `CREWBOOK_DEFAULT_LANGUAGE`   | `en`                                 |

use directories::ProjectDirs;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use crewbook_core::Language;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub db_max_connections: u32,
    /// Appended to totals in confirmation messages, e.g. `MAD`.
    pub currency_symbol: String,
    /// Used when a request carries no `Accept-Language`.
    pub default_language: Language,
}

impl ServerConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Loads configuration from an explicit variable map.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

        let bind_addr = get("CREWBOOK_BIND_ADDR")
            .unwrap_or("0.0.0.0:8080")
            .parse()
            .map_err(|_| ConfigError::InvalidValue("CREWBOOK_BIND_ADDR".to_string()))?;

        let database_path = match get("CREWBOOK_DB_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let db_max_connections = get("CREWBOOK_DB_MAX_CONNECTIONS")
            .unwrap_or("5")
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ConfigError::InvalidValue("CREWBOOK_DB_MAX_CONNECTIONS".to_string()))?;

        let currency_symbol = get("CREWBOOK_CURRENCY_SYMBOL").unwrap_or("").to_string();

        let default_language = match get("CREWBOOK_DEFAULT_LANGUAGE") {
            None => Language::default(),
            Some(tag) => match tag.to_ascii_lowercase().as_str() {
                "en" => Language::En,
                "fr" => Language::Fr,
                "ar" => Language::Ar,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "CREWBOOK_DEFAULT_LANGUAGE".to_string(),
                    ))
                }
            },
        };

        Ok(ServerConfig {
            bind_addr,
            database_path,
            db_max_connections,
            currency_symbol,
            default_language,
        })
    }
}

/// Platform data directory, created if missing.
///
/// - **Linux**: `~/.local/share/crewbook/crewbook.db`
/// - **macOS**: `~/Library/Application Support/com.crewbook.crewbook/crewbook.db`
/// - **Windows**: `%APPDATA%\crewbook\crewbook\data\crewbook.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "crewbook", "crewbook").ok_or(ConfigError::NoDataDir)?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(data_dir.join("crewbook.db"))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory; set CREWBOOK_DB_PATH")]
    NoDataDir,

    #[error("Could not create app data directory: {0}")]
    DataDir(String),
}
