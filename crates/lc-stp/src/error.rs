use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::issuance::gateway::GatewayError;
use crate::workflows::issuance::service::IssuanceServiceError;
use crate::workflows::kyc::KycError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Issuance(IssuanceServiceError),
    Gateway(GatewayError),
    Kyc(KycError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Issuance(err) => write!(f, "issuance workflow error: {}", err),
            AppError::Gateway(err) => write!(f, "gateway error: {}", err),
            AppError::Kyc(err) => write!(f, "kyc error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Issuance(err) => Some(err),
            AppError::Gateway(err) => Some(err),
            AppError::Kyc(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<IssuanceServiceError> for AppError {
    fn from(value: IssuanceServiceError) -> Self {
        Self::Issuance(value)
    }
}

impl From<GatewayError> for AppError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}

impl From<KycError> for AppError {
    fn from(value: KycError) -> Self {
        Self::Kyc(value)
    }
}
