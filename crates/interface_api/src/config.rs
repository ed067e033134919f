//! API configuration

use serde::Deserialize;
use std::str::FromStr;

use core_kernel::{TemporalError, Timezone};

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection string
    pub database_url: String,
    /// Maximum pooled database connections
    pub db_max_connections: u32,
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// Token validity in seconds
    pub jwt_expiration_secs: u64,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// `text` or `json`
    pub log_format: String,
    /// IANA timezone that defines "today" and the current month
    pub timezone: String,
    /// Base URL of the web client, used in password reset links
    pub public_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            database_url: "postgres://localhost/finance".to_string(),
            db_max_connections: 10,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 7 * 24 * 60 * 60,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            timezone: "America/Sao_Paulo".to_string(),
            public_url: "http://localhost:3000".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `FINANCE_*` environment variables over the defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port)?
            .set_default("database_url", defaults.database_url)?
            .set_default("db_max_connections", defaults.db_max_connections)?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("jwt_expiration_secs", defaults.jwt_expiration_secs)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", defaults.log_format)?
            .set_default("timezone", defaults.timezone)?
            .set_default("public_url", defaults.public_url)?
            .add_source(config::Environment::with_prefix("FINANCE").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses the configured timezone
    pub fn timezone(&self) -> Result<Timezone, TemporalError> {
        Timezone::from_str(&self.timezone)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
