//! Configuration management for the server.

use std::env;

/// Default size of the PostgreSQL connection pool.
const DEFAULT_MAX_DB_CONNECTIONS: u32 = 10;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Maximum size of the database connection pool
    pub max_db_connections: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let max_db_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidMaxConnections)?,
            Err(_) => DEFAULT_MAX_DB_CONNECTIONS,
        };

        Ok(Self {
            host,
            port,
            database_url,
            max_db_connections,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,

    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("Invalid DATABASE_MAX_CONNECTIONS value")]
    InvalidMaxConnections,
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns all env mutation: unit tests share the process
    // environment, so splitting these into separate #[test] fns would race.
    #[test]
    fn from_env_defaults_and_overrides() {
        env::remove_var("HOST");
        env::remove_var("PORT");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::set_var("DATABASE_URL", "postgres://localhost/tandem_test");

        let config = Config::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_db_connections, 10);

        env::set_var("DATABASE_MAX_CONNECTIONS", "25");
        let config = Config::from_env().unwrap();
        assert_eq!(config.max_db_connections, 25);

        env::set_var("DATABASE_MAX_CONNECTIONS", "lots");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidMaxConnections)
        ));

        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("DATABASE_URL");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingDatabaseUrl)
        ));
    }
}
