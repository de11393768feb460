//! Configuration module
//!
//! Configuration comes from the process environment, with a `.env` file loaded
//! first when present. Database connection settings are either a single
//! `DATABASE_URL` or the discrete `DATABASE_HOST` / `DATABASE_PORT` /
//! `DATABASE_NAME` / `DATABASE_USER` / `DATABASE_PASSWORD` variables.

use std::env;

use crate::metadata::MAX_FILE_NAME_LENGTH;

// Common constants
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DATABASE_PORT: u16 = 5432;
const SERVER_PORT: u16 = 8000;
const MAX_FILE_SIZE_MB: usize = 100;

/// How to reach the metadata database.
#[derive(Clone)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        host: String,
        port: u16,
        name: String,
        user: String,
        password: String,
    },
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseConfig::Url(_) => f.debug_tuple("Url").field(&"<redacted>").finish(),
            DatabaseConfig::Parts {
                host,
                port,
                name,
                user,
                ..
            } => f
                .debug_struct("Parts")
                .field("host", host)
                .field("port", port)
                .field("name", name)
                .field("user", user)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub database: DatabaseConfig,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub run_migrations: bool,
    pub max_file_size_bytes: usize,
    pub max_file_name_length: usize,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database = match lookup("DATABASE_URL").filter(|s| !s.is_empty()) {
            Some(url) => DatabaseConfig::Url(url),
            None => DatabaseConfig::Parts {
                host: lookup("DATABASE_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: lookup("DATABASE_PORT")
                    .unwrap_or_else(|| DATABASE_PORT.to_string())
                    .parse()
                    .map_err(|_| anyhow::anyhow!("DATABASE_PORT must be a valid number"))?,
                name: lookup("DATABASE_NAME").ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_NAME must be set when DATABASE_URL is not")
                })?,
                user: lookup("DATABASE_USER").ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_USER must be set when DATABASE_URL is not")
                })?,
                password: lookup("DATABASE_PASSWORD").unwrap_or_default(),
            },
        };

        let max_file_size_mb = lookup("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let config = Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            database,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            run_migrations: lookup("RUN_MIGRATIONS")
                .unwrap_or_else(|| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            max_file_name_length: lookup("MAX_FILE_NAME_LENGTH")
                .unwrap_or_else(|| MAX_FILE_NAME_LENGTH.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_FILE_NAME_LENGTH must be a valid number"))?,
            log_format: lookup("LOG_FORMAT")
                .unwrap_or_else(|| "pretty".to_string())
                .to_lowercase(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if let DatabaseConfig::Url(url) = &self.database {
            if !(url.starts_with("postgresql://") || url.starts_with("postgres://")) {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        if self.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be at least 1"));
        }

        if self.max_file_name_length == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_NAME_LENGTH must be at least 1"));
        }

        if !["pretty", "json"].contains(&self.log_format.as_str()) {
            return Err(anyhow::anyhow!("LOG_FORMAT must be 'pretty' or 'json'"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_discrete_database_vars() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_NAME", "files"),
            ("DATABASE_USER", "app"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 8000);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.db_timeout_seconds, 30);
        assert!(config.run_migrations);
        assert_eq!(config.max_file_size_bytes, 100 * 1024 * 1024);
        assert_eq!(config.max_file_name_length, 30);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert!(!config.is_production());
        match config.database {
            DatabaseConfig::Parts {
                host,
                port,
                name,
                user,
                password,
            } => {
                assert_eq!(host, "localhost");
                assert_eq!(port, 5432);
                assert_eq!(name, "files");
                assert_eq!(user, "app");
                assert_eq!(password, "");
            }
            DatabaseConfig::Url(_) => panic!("expected discrete database settings"),
        }
    }

    #[test]
    fn test_database_url_takes_precedence() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://app:secret@db:5432/files"),
            ("DATABASE_HOST", "ignored"),
        ]))
        .unwrap();
        assert!(matches!(config.database, DatabaseConfig::Url(_)));
    }

    #[test]
    fn test_missing_database_name_fails() {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_USER", "app")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_NAME"));
    }

    #[test]
    fn test_invalid_port_fails() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/files"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_non_postgres_url_fails() {
        assert!(Config::from_lookup(lookup_from(&[("DATABASE_URL", "mysql://localhost/files")]))
            .is_err());
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/files"),
            ("ENVIRONMENT", "production"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("CORS_ORIGINS"));

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/files"),
            ("APP_ENV", "prod"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
        ]))
        .unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_zero_name_length_rejected() {
        assert!(Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/files"),
            ("MAX_FILE_NAME_LENGTH", "0"),
        ]))
        .is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_NAME", "files"),
            ("DATABASE_USER", "app"),
            ("DATABASE_PASSWORD", "hunter2"),
        ]))
        .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
