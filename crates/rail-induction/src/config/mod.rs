use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use chrono::TimeDelta;

use crate::workflows::induction::InductionThresholds;

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

/// Top-level configuration for the planner service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub induction: InductionThresholds,
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
            induction: load_thresholds()?,
        })
    }
}

fn load_thresholds() -> Result<InductionThresholds, ConfigError> {
    let defaults = InductionThresholds::default();
    Ok(InductionThresholds {
        mileage_window_days: threshold(
            "INDUCTION_MILEAGE_WINDOW_DAYS",
            defaults.mileage_window_days,
            |days: &i64| *days >= 0 && TimeDelta::try_days(*days).is_some(),
        )?,
        cleaning_lookahead_hours: threshold(
            "INDUCTION_CLEANING_LOOKAHEAD_HOURS",
            defaults.cleaning_lookahead_hours,
            |hours: &i64| *hours >= 0 && TimeDelta::try_hours(*hours).is_some(),
        )?,
        branding_critical_pct: threshold(
            "INDUCTION_BRANDING_CRITICAL_PCT",
            defaults.branding_critical_pct,
            percentage,
        )?,
        branding_warning_pct: threshold(
            "INDUCTION_BRANDING_WARNING_PCT",
            defaults.branding_warning_pct,
            percentage,
        )?,
        mileage_variance_pct: threshold(
            "INDUCTION_MILEAGE_VARIANCE_PCT",
            defaults.mileage_variance_pct,
            percentage,
        )?,
        moderate_warning_count: threshold(
            "INDUCTION_MODERATE_WARNING_COUNT",
            defaults.moderate_warning_count,
            |_: &usize| true,
        )?,
    })
}

fn percentage(value: &f64) -> bool {
    value.is_finite() && *value >= 0.0
}

fn threshold<T: FromStr>(
    name: &'static str,
    default: T,
    accepts: fn(&T) -> bool,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => {
            let parsed = raw.trim().parse::<T>().ok().filter(accepts);
            parsed.ok_or(ConfigError::InvalidThreshold { name, value: raw })
        }
        Err(_) => Ok(default),
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { name, value } => {
                write!(f, "{name} has an invalid value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidThreshold { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
