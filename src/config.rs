//! Server configuration from environment variables.
//!
//! AWS region and credentials are resolved by `aws-config` from the
//! standard AWS environment; they never pass through this type.

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// DynamoDB, one table per resource type.
    Dynamo,
    /// Process-local in-memory store; records vanish on restart.
    Memory,
}

impl Backend {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dynamo" => Some(Backend::Dynamo),
            "memory" => Some(Backend::Memory),
            _ => None,
        }
    }
}

/// Application configuration.
///
/// Environment variables:
/// - `FLEETDESK_PORT`: listen port (default 8000)
/// - `FLEETDESK_BACKEND`: `dynamo` or `memory` (default `dynamo`)
/// - `FLEETDESK_TABLE_PREFIX`: DynamoDB table name prefix (default `Fleetdesk`)
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub backend: Backend,
    pub table_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("FLEETDESK_PORT") {
            Ok(v) => v.parse().map_err(|_| ConfigError::InvalidPort(v))?,
            Err(_) => 8000,
        };

        let backend = match std::env::var("FLEETDESK_BACKEND") {
            Ok(v) => Backend::parse(&v).ok_or(ConfigError::InvalidBackend(v))?,
            Err(_) => Backend::Dynamo,
        };

        let table_prefix =
            std::env::var("FLEETDESK_TABLE_PREFIX").unwrap_or_else(|_| "Fleetdesk".to_string());

        Ok(Self {
            port,
            backend,
            table_prefix,
        })
    }

    /// Table name for a resource collection, e.g. `FleetdeskServers`.
    pub fn table_name(&self, collection: &str) -> String {
        format!("{}{}", self.table_prefix, collection)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidBackend(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort(v) => write!(f, "invalid FLEETDESK_PORT: '{}'", v),
            ConfigError::InvalidBackend(v) => {
                write!(f, "invalid FLEETDESK_BACKEND: '{}' (use 'dynamo' or 'memory')", v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
