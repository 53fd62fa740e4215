//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    auth_providers, DEFAULT_AUTH_REDIRECT_URL, DEFAULT_GENERATION_DELAY_MS,
    DEFAULT_JWT_EXPIRY_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SESSION_IDLE_TTL_SECS, DEFAULT_SESSION_SWEEP_INTERVAL_SECS,
    DEFAULT_TEST_RUN_DELAY_MS,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub simulation: SimulationConfig,
    pub sessions: SessionConfig,
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub json_logs: bool,
}

/// Simulated pipeline configuration
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Latency before generated code appears
    pub generation_delay: Duration,
    /// Latency before a test run completes
    pub test_run_delay: Duration,
    /// Fixed seed for the submission sampler; random when unset
    pub seed: Option<u64>,
}

/// Session lifetime configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sessions not updated for this long are evicted
    pub idle_ttl: Duration,
    /// Period of the eviction sweep
    pub sweep_interval: Duration,
}

/// Which auth backend the service talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthBackend {
    /// In-process user table
    Local { jwt_secret: String, expiry_hours: i64 },
    /// Managed auth service reached over HTTP
    Remote { url: String, anon_key: String },
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub backend: AuthBackend,
    /// Redirect target embedded in sign-up confirmation emails
    pub redirect_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            simulation: SimulationConfig::from_env()?,
            sessions: SessionConfig::from_env()?,
            auth: AuthConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: env::var("LOG_FORMAT").is_ok_and(|format| format == "json"),
        })
    }
}

impl SimulationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let seed = match env::var("SIMULATION_SEED") {
            Ok(raw) => Some(
                raw.parse()
                    .map_err(|_| ConfigError::InvalidValue("SIMULATION_SEED".to_string()))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            generation_delay: Duration::from_millis(parse_var(
                "GENERATION_DELAY_MS",
                DEFAULT_GENERATION_DELAY_MS,
            )?),
            test_run_delay: Duration::from_millis(parse_var(
                "TEST_RUN_DELAY_MS",
                DEFAULT_TEST_RUN_DELAY_MS,
            )?),
            seed,
        })
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            generation_delay: Duration::from_millis(DEFAULT_GENERATION_DELAY_MS),
            test_run_delay: Duration::from_millis(DEFAULT_TEST_RUN_DELAY_MS),
            seed: None,
        }
    }
}

impl SessionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            idle_ttl: parse_secs("SESSION_IDLE_TTL_SECS", DEFAULT_SESSION_IDLE_TTL_SECS)?,
            sweep_interval: parse_secs(
                "SESSION_SWEEP_INTERVAL_SECS",
                DEFAULT_SESSION_SWEEP_INTERVAL_SECS,
            )?,
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(DEFAULT_SESSION_IDLE_TTL_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SESSION_SWEEP_INTERVAL_SECS),
        }
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let provider =
            env::var("AUTH_PROVIDER").unwrap_or_else(|_| auth_providers::LOCAL.to_string());

        let backend = match provider.as_str() {
            auth_providers::LOCAL => AuthBackend::Local {
                jwt_secret: require_var("JWT_SECRET")?,
                expiry_hours: parse_var("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
            },
            auth_providers::REMOTE => AuthBackend::Remote {
                url: require_var("AUTH_URL")?,
                anon_key: require_var("AUTH_ANON_KEY")?,
            },
            _ => return Err(ConfigError::InvalidValue("AUTH_PROVIDER".to_string())),
        };

        Ok(Self {
            backend,
            redirect_url: env::var("AUTH_REDIRECT_URL")
                .unwrap_or_else(|_| DEFAULT_AUTH_REDIRECT_URL.to_string()),
        })
    }
}

fn require_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name.to_string()))
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// A strictly positive number of seconds
fn parse_secs(name: &str, default: u64) -> Result<Duration, ConfigError> {
    match parse_var(name, default)? {
        0 => Err(ConfigError::InvalidValue(name.to_string())),
        secs => Ok(Duration::from_secs(secs)),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
            json_logs: false,
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_simulation_defaults_match_page_timers() {
        let simulation = SimulationConfig::default();
        assert_eq!(simulation.generation_delay, Duration::from_secs(2));
        assert_eq!(simulation.test_run_delay, Duration::from_secs(3));
        assert!(simulation.seed.is_none());
    }

    #[test]
    fn test_parse_var_falls_back_to_default() {
        let port: u16 = parse_var("PROMPTJUDGE_UNSET_TEST_VARIABLE", 4242).unwrap();
        assert_eq!(port, 4242);
    }

    #[test]
    fn test_session_defaults() {
        let sessions = SessionConfig::default();
        assert_eq!(sessions.idle_ttl, Duration::from_secs(3600));
        assert_eq!(sessions.sweep_interval, Duration::from_secs(60));

        let ttl = parse_secs("PROMPTJUDGE_UNSET_TEST_VARIABLE", 5).unwrap();
        assert_eq!(ttl, Duration::from_secs(5));
        assert!(matches!(
            parse_secs("PROMPTJUDGE_UNSET_TEST_VARIABLE", 0),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
