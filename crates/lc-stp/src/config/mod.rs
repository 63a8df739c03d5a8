use std::env;
use std::fmt;
use std::path::PathBuf;

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

/// Top-level configuration for the issuance pipeline.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub outbox: OutboxConfig,
    pub kyc: KycConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("LC_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let outbox_dir = env::var("LC_OUTBOX_DIR").unwrap_or_else(|_| "outbox".to_string());
        if outbox_dir.trim().is_empty() {
            return Err(ConfigError::EmptyOutboxDir);
        }

        let registry_path =
            env::var("LC_REGISTRY_PATH").unwrap_or_else(|_| "company_registry.csv".to_string());
        if registry_path.trim().is_empty() {
            return Err(ConfigError::EmptyRegistryPath);
        }

        let log_level = env::var("LC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            outbox: OutboxConfig {
                directory: PathBuf::from(outbox_dir),
            },
            kyc: KycConfig {
                registry_path: PathBuf::from(registry_path),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where draft SWIFT messages and generated documents are stored.
#[derive(Debug, Clone)]
pub struct OutboxConfig {
    pub directory: PathBuf,
}

/// Location of the simulated company registry consumed by KYC verification.
#[derive(Debug, Clone)]
pub struct KycConfig {
    pub registry_path: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyOutboxDir,
    EmptyRegistryPath,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyOutboxDir => write!(f, "LC_OUTBOX_DIR must not be empty"),
            ConfigError::EmptyRegistryPath => write!(f, "LC_REGISTRY_PATH must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}
