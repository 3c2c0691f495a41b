//! Connection configuration for the seeder.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

/// `application_name` reported to Postgres by seeder connections.
pub const APPLICATION_NAME: &str = "premier-league-seed";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid DB_PORT value: {value:?}")]
    InvalidPort { value: String },
    #[error("Invalid database URL: {0}")]
    InvalidUrl(#[source] sqlx::Error),
}

/// Database connection parameters.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    pub db_name: String,
    pub user: String,
    /// `None` sends no password (trust / peer auth, or `PGPASSWORD`).
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            db_name: "premier_league_db".to_string(),
            user: "postgres".to_string(),
            password: None,
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

// Keeps the password out of logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("db_name", &self.db_name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl DbConfig {
    /// Reads `DB_NAME` (or `DB_DATABASE`), `DB_USER`, `DB_PASSWORD`, `DB_HOST`
    /// and `DB_PORT`, falling back to [`DbConfig::default`] per field.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DbConfig::from_env`] with a caller-supplied variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match var("DB_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => defaults.port,
        };

        Ok(Self {
            db_name: var("DB_NAME")
                .or_else(|| var("DB_DATABASE"))
                .unwrap_or(defaults.db_name),
            user: var("DB_USER").unwrap_or(defaults.user),
            password: var("DB_PASSWORD"),
            host: var("DB_HOST").unwrap_or(defaults.host),
            port,
        })
    }

    /// Builds sqlx connect options from the individual fields.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.db_name)
            .application_name(APPLICATION_NAME);

        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

/// Parses a `postgres://` URL, which takes precedence over [`DbConfig`] fields.
pub fn connect_options_from_url(url: &str) -> Result<PgConnectOptions, ConfigError> {
    let options: PgConnectOptions = url.parse().map_err(ConfigError::InvalidUrl)?;
    Ok(options.application_name(APPLICATION_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = DbConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DbConfig::default());
        assert_eq!(config.db_name, "premier_league_db");
        assert_eq!(config.port, 5432);
        assert!(config.password.is_none());
    }

    #[test]
    fn test_reads_all_fields() {
        let config = DbConfig::from_lookup(lookup(&[
            ("DB_NAME", "league"),
            ("DB_USER", "seeder"),
            ("DB_PASSWORD", "s3cret"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
        ]))
        .unwrap();

        assert_eq!(config.db_name, "league");
        assert_eq!(config.user, "seeder");
        assert_eq!(config.password.as_deref(), Some("s3cret"));
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
    }

    #[test]
    fn test_db_database_alias() {
        let config = DbConfig::from_lookup(lookup(&[("DB_DATABASE", "fpl")])).unwrap();
        assert_eq!(config.db_name, "fpl");

        let config =
            DbConfig::from_lookup(lookup(&[("DB_DATABASE", "fpl"), ("DB_NAME", "league")]))
                .unwrap();
        assert_eq!(config.db_name, "league");
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config =
            DbConfig::from_lookup(lookup(&[("DB_HOST", ""), ("DB_PASSWORD", "")])).unwrap();
        assert_eq!(config.host, "localhost");
        assert!(config.password.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = DbConfig::from_lookup(lookup(&[("DB_PORT", "fifty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value } if value == "fifty"));

        let err = DbConfig::from_lookup(lookup(&[("DB_PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = DbConfig {
            password: Some("hunter2".to_string()),
            ..DbConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_connect_options_carry_fields() {
        let config = DbConfig {
            host: "db.internal".to_string(),
            port: 6543,
            db_name: "league".to_string(),
            ..DbConfig::default()
        };
        let options = config.connect_options();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("league"));
        assert_eq!(options.get_username(), "postgres");
        assert_eq!(options.get_application_name(), Some(APPLICATION_NAME));
    }

    #[test]
    fn test_url_options() {
        let options =
            connect_options_from_url("postgres://seeder:pw@localhost:5433/premier_league_db")
                .unwrap();
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_database(), Some("premier_league_db"));

        assert!(matches!(
            connect_options_from_url("not a url"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
