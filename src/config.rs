use crate::error::AppError;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/predict";
pub const UPLOAD_FIELD_NAME: &str = "file";

const ENDPOINT_ENV: &str = "GENRE_DEMO_ENDPOINT";
const TIMEOUT_ENV: &str = "GENRE_DEMO_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub endpoint: String,
    pub field_name: String,
    /// Per-request timeout. `None` waits for the endpoint indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: UPLOAD_FIELD_NAME.to_string(),
            timeout: None,
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }

        if let Some(secs) = lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            config.timeout = Some(parse_timeout(&secs)?);
        }

        Ok(config)
    }
}

pub fn parse_timeout(value: &str) -> Result<Duration, AppError> {
    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|_| AppError::from(format!("Invalid timeout '{}': expected whole seconds", value)))?;
    if secs == 0 {
        return Err("Timeout must be at least one second".into());
    }
    Ok(Duration::from_secs(secs))
}
