use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::underwriting::{DecisionPolicy, DEFAULT_APPROVAL_THRESHOLD};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub model: ModelSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let artifact_path = env::var("APP_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("model/underwriting_model.json"));

        let threshold = match env::var("APP_APPROVAL_THRESHOLD") {
            Ok(raw) => parse_threshold(&raw)?,
            Err(_) => DEFAULT_APPROVAL_THRESHOLD,
        };

        let policy = match env::var("APP_DECISION_POLICY") {
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "threshold" => DecisionPolicy::ProbabilityThreshold { threshold },
                "model-label" | "model_label" => DecisionPolicy::ModelLabel,
                _ => return Err(ConfigError::UnknownDecisionPolicy { value: raw }),
            },
            Err(_) => DecisionPolicy::ProbabilityThreshold { threshold },
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            model: ModelSettings {
                artifact_path,
                policy,
            },
        })
    }
}

fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    let threshold = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidThreshold {
            value: raw.to_string(),
        })?;

    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::InvalidThreshold {
            value: raw.to_string(),
        });
    }

    Ok(threshold)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the classifier artifact lives and how its output becomes a label.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub artifact_path: PathBuf,
    pub policy: DecisionPolicy,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { value: String },
    UnknownDecisionPolicy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { value } => {
                write!(
                    f,
                    "APP_APPROVAL_THRESHOLD must be a number in [0, 1], found '{value}'"
                )
            }
            ConfigError::UnknownDecisionPolicy { value } => {
                write!(
                    f,
                    "APP_DECISION_POLICY must be 'threshold' or 'model-label', found '{value}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_MODEL_PATH");
        env::remove_var("APP_APPROVAL_THRESHOLD");
        env::remove_var("APP_DECISION_POLICY");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(
            config.model.artifact_path,
            PathBuf::from("model/underwriting_model.json")
        );
        assert_eq!(
            config.model.policy,
            DecisionPolicy::ProbabilityThreshold {
                threshold: DEFAULT_APPROVAL_THRESHOLD
            }
        );
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn reads_decision_policy_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DECISION_POLICY", "model-label");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.model.policy, DecisionPolicy::ModelLabel);

        env::set_var("APP_DECISION_POLICY", "threshold");
        env::set_var("APP_APPROVAL_THRESHOLD", "0.55");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.model.policy,
            DecisionPolicy::ProbabilityThreshold { threshold: 0.55 }
        );
        reset_env();
    }

    #[test]
    fn rejects_threshold_outside_unit_interval() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_APPROVAL_THRESHOLD", "1.5");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidThreshold { .. })
        ));
        reset_env();
    }

    #[test]
    fn rejects_unknown_decision_policy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DECISION_POLICY", "coin-flip");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::UnknownDecisionPolicy { .. })
        ));
        reset_env();
    }
}
