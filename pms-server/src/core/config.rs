//! Server configuration

use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration — all knobs of the PMS backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATA_DIR | /var/lib/pms | data directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | TIMEZONE | Asia/Kolkata | business timezone |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | JWT_SECRET / JWT_EXPIRATION_MINUTES / JWT_ISSUER / JWT_AUDIENCE | — | JWT settings |
///
/// # Example
///
/// ```ignore
/// DATA_DIR=/data/pms HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory holding the database and logs
    pub data_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Business timezone — one timezone, one currency by design
    pub timezone: chrono_tz::Tz,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let timezone = std::env::var("TIMEZONE")
            .ok()
            .and_then(|tz| {
                tz.parse::<chrono_tz::Tz>()
                    .map_err(|e| {
                        tracing::warn!("Invalid TIMEZONE '{}': {}, using Asia/Kolkata", tz, e);
                        e
                    })
                    .ok()
            })
            .unwrap_or(chrono_tz::Asia::Kolkata);

        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/var/lib/pms".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone,
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override data dir and port (test scenarios)
    pub fn with_overrides(data_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config.http_port = http_port;
        config
    }

    /// Database directory (`<data_dir>/database`)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("database")
    }

    /// Log directory (`<data_dir>/logs`)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("logs")
    }

    /// Ensure the data directory structure exists
    pub fn ensure_data_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}
