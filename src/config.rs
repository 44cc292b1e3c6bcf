//! Configuration module
//!
//! Loads configuration from environment variables. Built once at startup and
//! handed to the components that need it.

use std::env;

use crate::auth::PasswordHashingParams;

/// Secret used outside production when none is configured
const DEVELOPMENT_JWT_SECRET: &str = "development-only-secret";

/// `ENVIRONMENT` value that turns off development fallbacks
const PRODUCTION_ENVIRONMENT: &str = "production";

/// `DATABASE_URL` value selecting the in-memory store
pub const MEMORY_DATABASE_URL: &str = "memory";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Database connection URL, or `memory`
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Apply bundled migrations at startup
    pub run_migrations: bool,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Token signing secret
    pub jwt_secret: String,

    /// Argon2 cost parameters
    pub password_hashing: PasswordHashingParams,

    /// Emit JSON log lines
    pub json_logs: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_max_connections", &self.database_max_connections)
            .field("run_migrations", &self.run_migrations)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("password_hashing", &self.password_hashing)
            .field("json_logs", &self.json_logs)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::MissingEnv("DATABASE_URL"))?;

        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?;
        let run_migrations = parse_or(&lookup, "RUN_MIGRATIONS", false)?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", 5000)?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let jwt_secret = match lookup("JWT_SECRET").or_else(|| lookup("SECRET_KEY")) {
            Some(secret) if !secret.is_empty() => secret,
            _ if environment == PRODUCTION_ENVIRONMENT => {
                return Err(ConfigError::MissingEnv("JWT_SECRET"))
            }
            _ => {
                tracing::warn!("JWT_SECRET not set; using the development secret");
                DEVELOPMENT_JWT_SECRET.to_string()
            }
        };

        let defaults = PasswordHashingParams::default();
        let password_hashing = PasswordHashingParams {
            memory_kib: parse_or(&lookup, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&lookup, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(&lookup, "PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };

        let json_logs = lookup("LOG_FORMAT").is_some_and(|format| format == "json");

        Ok(Self {
            database_url,
            database_max_connections,
            run_migrations,
            host,
            port,
            environment,
            jwt_secret,
            password_hashing,
            json_logs,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == PRODUCTION_ENVIRONMENT
    }

    /// Check if the in-memory store is selected
    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue(key)),
        None => Ok(default),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
