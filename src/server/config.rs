//! Process configuration loaded from the environment.

use std::path::PathBuf;

use crate::server::error::config::ConfigError;

pub static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    /// Development mode, relaxes the transport security settings
    pub debug: bool,
    /// File receiving warnings logged on the `security` target
    pub security_log: Option<PathBuf>,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` is not set
    /// - `Err(ConfigError::InvalidEnvValue)` - `DEBUG` is not a recognised boolean
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = var("DATABASE_URL")
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let bind_address =
            var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let debug = match var("DEBUG") {
            Some(value) => parse_bool("DEBUG", &value)?,
            None => false,
        };

        let security_log = var("SECURITY_LOG")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            database_url,
            bind_address,
            debug,
            security_log,
        })
    }

    pub fn security(&self) -> SecurityProfile {
        SecurityProfile::from_debug(self.debug)
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("expected true, false, 1 or 0 but got {:?}", other),
        }),
    }
}

/// Transport security settings selected by the debug flag.
///
/// Frame, content sniffing, XSS and referrer headers are sent in both modes and are not
/// part of the profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecurityProfile {
    /// Redirect plain HTTP requests to HTTPS
    pub ssl_redirect: bool,
    /// Send `Strict-Transport-Security` on secure responses
    pub hsts: bool,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
}

impl SecurityProfile {
    pub fn from_debug(debug: bool) -> Self {
        let production = !debug;

        Self {
            ssl_redirect: production,
            hsts: production,
            secure_cookies: production,
        }
    }
}
