//! Environment-driven defaults.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory. CLI flags take precedence over both.

use crate::domain::{REFERENCE_TEMPERATURE_C, SERVICE_TEMPERATURE_MAX_C, SERVICE_TEMPERATURE_MIN_C};
use crate::error::AppError;

pub const ENV_SERVICE_TEMPERATURE: &str = "ACS_SERVICE_TEMPERATURE_C";
pub const ENV_LOG: &str = "ACS_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Seed the process environment from `.env`, if present.
///
/// Must run before `init_tracing` and `Settings::from_env` so both see `.env` values.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Service temperature used when a request does not give one (°C).
    pub default_service_temperature_c: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_service_temperature_c: REFERENCE_TEMPERATURE_C,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut settings = Settings::default();
        if let Some(raw) = lookup(ENV_SERVICE_TEMPERATURE) {
            let t: u32 = raw.trim().parse().map_err(|_| {
                AppError::new(2, format!("{ENV_SERVICE_TEMPERATURE} must be a whole number (got '{raw}')."))
            })?;
            if !(SERVICE_TEMPERATURE_MIN_C..=SERVICE_TEMPERATURE_MAX_C).contains(&t) {
                return Err(AppError::new(
                    2,
                    format!(
                        "{ENV_SERVICE_TEMPERATURE} must be between {SERVICE_TEMPERATURE_MIN_C} and {SERVICE_TEMPERATURE_MAX_C} °C (got {t})."
                    ),
                ));
            }
            settings.default_service_temperature_c = f64::from(t);
        }
        Ok(settings)
    }
}

/// Tracing filter directive from `ACS_LOG`, default `warn`.
pub fn log_filter(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup(ENV_LOG)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Install the stderr tracing subscriber, filtered by `log_filter`.
pub fn init_tracing() {
    let directive = log_filter(|key| std::env::var(key).ok());
    let filter = tracing_subscriber::EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    // A subscriber may already be set (e.g. when embedded); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
