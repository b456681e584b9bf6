//! Configuration loading from the environment
//!
//! All runtime configuration arrives through environment variables (a
//! `.env` file is honored in development via `dotenvy`). Missing required
//! variables and unparsable numbers fail startup with a [`ConfigError`].

use crate::core::error::ConfigError;
use chrono::Duration;

/// Default database name
pub const DEFAULT_DATABASE_NAME: &str = "cleanHub";

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;

/// Default token lifetime in hours
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// MongoDB connection string (`MONGODB_URI`)
    pub database_url: String,

    /// Database name (`DATABASE_NAME`)
    pub database_name: String,

    /// Listening port (`PORT`)
    pub port: u16,

    /// Token signing secret (`JWT_SECRET`)
    pub jwt_secret: String,

    /// Token lifetime in hours (`JWT_EXPIRES_IN_HOURS`)
    pub token_ttl_hours: i64,
}

impl AppConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Token lifetime as a duration
    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.token_ttl_hours)
    }

    /// Build the configuration from any variable source
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            get("MONGODB_URI").ok_or(ConfigError::MissingVariable { name: "MONGODB_URI" })?;

        let database_name =
            get("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                name: "PORT",
                value: raw,
                message: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let jwt_secret =
            get("JWT_SECRET").ok_or(ConfigError::MissingVariable { name: "JWT_SECRET" })?;

        let token_ttl_hours = match get("JWT_EXPIRES_IN_HOURS") {
            Some(raw) => raw.parse::<i64>().map_err(|e| ConfigError::InvalidValue {
                name: "JWT_EXPIRES_IN_HOURS",
                value: raw,
                message: e.to_string(),
            })?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };

        Ok(Self {
            database_url,
            database_name,
            port,
            jwt_secret,
            token_ttl_hours,
        })
    }
}
