use std::env;
use std::fmt;
use std::str::FromStr;

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
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            engine: EngineConfig::from_env()?,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs shared by every recommendation run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Admission year requested from the record source.
    pub admission_year: i32,
    /// Slate size used when the caller does not pass a limit.
    pub default_limit: usize,
    /// Score substituted when a student profile omits one.
    pub default_score: i32,
    /// Seed for the fallback sampler, so degraded runs stay reproducible.
    pub fallback_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            admission_year: 2025,
            default_limit: 120,
            default_score: 500,
            fallback_seed: 0,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            admission_year: parse_var("APP_ADMISSION_YEAR", defaults.admission_year)?,
            default_limit: parse_var("APP_DEFAULT_LIMIT", defaults.default_limit)?,
            default_score: parse_var("APP_DEFAULT_SCORE", defaults.default_score)?,
            fallback_seed: parse_var("APP_FALLBACK_SEED", defaults.fallback_seed)?,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidVar { name }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidVar { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidVar { name } => {
                write!(f, "{name} must parse to its expected numeric type")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
