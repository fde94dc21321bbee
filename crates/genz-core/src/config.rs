//! Configuration management with environment variable support.
//!
//! - [`Environment`]: the deployment profile, detected from `GENZ_ENV`
//! - [`ServerConfig`]: bind address and body limit, loaded from `GENZ_*` variables
//! - [`load_dotenv`]: `.env` loading that never overrides existing variables
//!
//! # Example
//!
//! ```ignore
//! use genz_core::{load_dotenv, ServerConfig};
//!
//! load_dotenv();
//! let config = ServerConfig::from_env()?;
//! println!("listening on {}", config.addr());
//! ```

use serde::Deserialize;
use std::fmt;

/// Default request body limit (1 MiB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable deserialization failed.
    #[error("Configuration error: {0}")]
    Envy(#[from] envy::Error),
}

/// Environment profile for the application.
///
/// Detected from the `GENZ_ENV` environment variable. Controls whether
/// handler output is checked against the response schema, whether 5xx
/// messages are masked and the default log level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Verbose errors, debug logging, response schema checks
    Development,
    /// Masked server errors, info logging, no response schema checks
    Production,
    /// Custom environment name for specialized deployments.
    Custom(String),
}

impl Environment {
    /// Detect the current environment from `GENZ_ENV`.
    ///
    /// - `production` / `prod` is [`Environment::Production`]
    /// - `development` / `dev` or unset is [`Environment::Development`]
    /// - anything else is [`Environment::Custom`]
    pub fn current() -> Self {
        match std::env::var("GENZ_ENV").as_deref() {
            Ok("production") | Ok("prod") => Self::Production,
            Ok("development") | Ok("dev") => Self::Development,
            Ok(other) => Self::Custom(other.to_string()),
            Err(_) => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Server error details are shown everywhere except production
    pub fn show_error_details(&self) -> bool {
        !self.is_production()
    }

    /// Handler output is checked against the response schema everywhere except production
    pub fn check_responses(&self) -> bool {
        !self.is_production()
    }

    /// - Development: "debug"
    /// - Production: "info"
    /// - Custom: "info"
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Production | Self::Custom(_) => "info",
        }
    }

    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub fn log_directive(&self) -> String {
        if self.is_development() {
            format!(
                "{},hyper=info,genz_core=debug,genz_openapi=debug",
                self.default_log_level()
            )
        } else {
            self.default_log_level().to_string()
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Server settings, loaded from `GENZ_HOST`, `GENZ_PORT` and `GENZ_BODY_LIMIT`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum request body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit: default_body_limit(),
        }
    }
}

impl ServerConfig {
    /// Load from `GENZ_`-prefixed environment variables; unset fields take defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(envy::prefixed("GENZ_").from_env::<Self>()?)
    }

    /// `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load environment variables from `.env` in the current directory.
///
/// A missing file is not an error. Existing variables take precedence.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Load environment variables from a specific file path.
pub fn load_dotenv_from<P: AsRef<std::path::Path>>(path: P) {
    let _ = dotenvy::from_path(path);
}
