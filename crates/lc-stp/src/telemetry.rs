use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    Filter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { value, .. } => {
                write!(f, "invalid log filter '{}'", value)
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// A bare level like "debug" is scoped to the issuance crates so dependency
/// noise stays at warn; anything containing '=' is taken as a full directive.
fn directive(level: &str) -> String {
    let trimmed = level.trim();
    if trimmed.contains('=') || trimmed.contains(',') {
        trimmed.to_string()
    } else {
        format!("warn,lc_stp={trimmed},lc_stp_console={trimmed}")
    }
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let value = directive(&config.log_level);
            EnvFilter::try_new(&value).map_err(|source| TelemetryError::Filter {
                value,
                source,
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_levels_are_scoped_to_the_workspace_crates() {
        assert_eq!(directive("debug"), "warn,lc_stp=debug,lc_stp_console=debug");
        assert_eq!(directive(" info "), "warn,lc_stp=info,lc_stp_console=info");
    }

    #[test]
    fn explicit_directives_pass_through() {
        assert_eq!(directive("lc_stp=trace"), "lc_stp=trace");
        assert_eq!(directive("warn,csv=off"), "warn,csv=off");
    }
}
