use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::checklist::ApplicationId;

const DEFAULT_SOURCE_URL: &str =
    "http://qa-gb.api.dynamatix.com:3100/api/applications/getApplicationById";
const DEFAULT_APPLICATION_ID: &str = "67339ae56d5231c1a2c63639";
const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;

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
    pub checklist: ChecklistConfig,
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
            telemetry: TelemetryConfig { log_level },
            checklist: ChecklistConfig::from_env()?,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where application records come from and which rules are applied to them.
#[derive(Debug, Clone)]
pub struct ChecklistConfig {
    pub source_url: Url,
    pub application_id: ApplicationId,
    pub fetch_timeout: Duration,
    pub rules_path: Option<PathBuf>,
}

impl ChecklistConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = env::var("CHECKLIST_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_SOURCE_URL.to_string())
            .trim()
            .to_string();
        let source_url = Url::parse(&raw_url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .ok_or(ConfigError::InvalidSourceUrl(raw_url))?;

        let application_id = env::var("CHECKLIST_APPLICATION_ID")
            .unwrap_or_else(|_| DEFAULT_APPLICATION_ID.to_string())
            .trim()
            .to_string();
        if application_id.is_empty() {
            return Err(ConfigError::MissingApplicationId);
        }

        let fetch_timeout_ms = match env::var("CHECKLIST_FETCH_TIMEOUT_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|millis| *millis > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            Err(_) => DEFAULT_FETCH_TIMEOUT_MS,
        };

        let rules_path = env::var("CHECKLIST_RULES_PATH")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            source_url,
            application_id: ApplicationId(application_id),
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            rules_path,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSourceUrl(String),
    MissingApplicationId,
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSourceUrl(value) => write!(
                f,
                "CHECKLIST_API_BASE_URL must be an http(s) URL, got '{}'",
                value
            ),
            ConfigError::MissingApplicationId => {
                write!(f, "CHECKLIST_APPLICATION_ID must not be empty")
            }
            ConfigError::InvalidTimeout => write!(
                f,
                "CHECKLIST_FETCH_TIMEOUT_MS must be a positive number of milliseconds"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSourceUrl(_)
            | ConfigError::MissingApplicationId
            | ConfigError::InvalidTimeout => None,
        }
    }
}
