use crate::error::{Result as ServerErrorResult, ServerError};

use portal_auth::JwtAlgorithm;

use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    /// JWT secret for HS256 validation
    pub jwt_secret: Option<String>,

    /// JWT public key for RS256 validation (PEM format)
    pub jwt_public_key: Option<String>,

    /// SQLite database path (default: portal.db)
    pub database_path: PathBuf,

    /// Log level (default: info)
    pub log_level: String,

    /// Enable colored logs (default: true)
    pub log_colored: bool,

    /// Optional log file path; None = stdout
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> ServerErrorResult<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|source| ServerError::InvalidBindAddr { source })?;

        Ok(Self {
            bind_addr,

            jwt_secret: std::env::var("JWT_SECRET").ok(),
            jwt_public_key: std::env::var("JWT_PUBLIC_KEY").ok(),

            database_path: std::env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("portal.db")),

            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            log_colored: std::env::var("LOG_COLORED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),

            log_file: std::env::var("LOG_FILE").ok().map(PathBuf::from),
        })
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> ServerErrorResult<()> {
        if self.jwt_secret.is_none() && self.jwt_public_key.is_none() {
            return Err(ServerError::Config {
                message: "either JWT_SECRET or JWT_PUBLIC_KEY must be set".to_string(),
            });
        }
        if let Some(secret) = &self.jwt_secret
            && secret.len() < 32
        {
            return Err(ServerError::Config {
                message: "JWT_SECRET must be at least 32 bytes".to_string(),
            });
        }

        Ok(())
    }

    /// Token verification algorithm, preferring RS256 when both are set
    pub fn jwt_algorithm(&self) -> ServerErrorResult<JwtAlgorithm> {
        if let Some(pem) = &self.jwt_public_key {
            return Ok(JwtAlgorithm::RS256 {
                public_key_pem: pem.clone(),
            });
        }
        if let Some(secret) = &self.jwt_secret {
            return Ok(JwtAlgorithm::HS256 {
                secret: secret.clone().into_bytes(),
            });
        }

        Err(ServerError::Config {
            message: "no JWT verification key configured".to_string(),
        })
    }

    /// Log a redacted summary at startup
    pub fn log_summary(&self) {
        log::info!("Bind address: {}", self.bind_addr);
        log::info!("Database: {}", self.database_path.display());
        log::info!(
            "JWT verification: {}",
            if self.jwt_public_key.is_some() {
                "RS256"
            } else {
                "HS256"
            }
        );
    }
}
