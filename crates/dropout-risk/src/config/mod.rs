pub use reqwest::Url;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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

/// Top-level configuration for the assessment service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub audit: AuditConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                pretty: environment == AppEnvironment::Development,
            },
            audit: AuditConfig::from_env()?,
        })
    }
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

/// Log filtering and formatting.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub pretty: bool,
}

/// Remote audit store settings. Without an endpoint, assessments are not logged.
#[derive(Debug, Clone, Default)]
pub struct AuditConfig {
    pub endpoint: Option<Url>,
    pub timeout: Option<Duration>,
}

impl AuditConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint = match env::var("AUDIT_ENDPOINT") {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_endpoint(raw.trim())?),
            _ => None,
        };

        let timeout = match env::var("AUDIT_TIMEOUT_MS") {
            Ok(raw) if !raw.trim().is_empty() => {
                let millis = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|millis| *millis > 0)
                    .ok_or(ConfigError::InvalidAuditTimeout)?;
                Some(Duration::from_millis(millis))
            }
            _ => None,
        };

        Ok(Self { endpoint, timeout })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::InvalidAuditEndpoint {
        value: raw.to_string(),
        reason: err.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidAuditEndpoint {
            value: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAuditEndpoint { value: String, reason: String },
    InvalidAuditTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAuditEndpoint { value, reason } => {
                write!(f, "AUDIT_ENDPOINT '{value}' is not a usable URL: {reason}")
            }
            ConfigError::InvalidAuditTimeout => {
                write!(f, "AUDIT_TIMEOUT_MS must be a positive number of milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidAuditEndpoint { .. }
            | ConfigError::InvalidAuditTimeout => None,
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
        env::remove_var("AUDIT_ENDPOINT");
        env::remove_var("AUDIT_TIMEOUT_MS");
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
        assert!(config.telemetry.pretty);
        assert!(config.audit.endpoint.is_none());
        assert!(config.audit.timeout.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_audit_endpoint_and_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("AUDIT_ENDPOINT", "https://records.example.edu/dropout");
        env::set_var("AUDIT_TIMEOUT_MS", "2500");

        let config = AppConfig::load().expect("config loads");

        assert_eq!(config.environment, AppEnvironment::Production);
        assert!(!config.telemetry.pretty);
        assert_eq!(
            config.audit.endpoint.as_ref().map(Url::as_str),
            Some("https://records.example.edu/dropout")
        );
        assert_eq!(config.audit.timeout, Some(Duration::from_millis(2500)));
        reset_env();
    }

    #[test]
    fn rejects_unusable_audit_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AUDIT_ENDPOINT", "ftp://records.example.edu");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidAuditEndpoint { .. })
        ));

        env::set_var("AUDIT_ENDPOINT", "not a url");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidAuditEndpoint { .. })
        ));

        env::remove_var("AUDIT_ENDPOINT");
        env::set_var("AUDIT_TIMEOUT_MS", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidAuditTimeout)
        ));
        reset_env();
    }
}
