use std::net::SocketAddr;
use thiserror::Error;

pub const HTTP_ADDR_VAR: &str = "PAYPLAN_HTTP_ADDR";
pub const CURRENCY_VAR: &str = "PAYPLAN_CURRENCY";
pub const DEFAULT_RATE_VAR: &str = "PAYPLAN_DEFAULT_RATE";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub http_addr: SocketAddr,
    pub currency: String,
    pub default_rate: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            currency: "CHF".to_string(),
            default_rate: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(HTTP_ADDR_VAR) {
            config.http_addr = raw.trim().parse().map_err(|err: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: HTTP_ADDR_VAR,
                    value: raw.clone(),
                    reason: err.to_string(),
                }
            })?;
        }

        if let Some(raw) = lookup(CURRENCY_VAR) {
            let code = raw.trim();
            if code.is_empty() {
                return Err(ConfigError::Invalid {
                    var: CURRENCY_VAR,
                    value: raw.clone(),
                    reason: "currency code must not be empty".into(),
                });
            }
            config.currency = code.to_string();
        }

        if let Some(raw) = lookup(DEFAULT_RATE_VAR) {
            let rate: f64 = raw.trim().parse().map_err(|err: std::num::ParseFloatError| {
                ConfigError::Invalid {
                    var: DEFAULT_RATE_VAR,
                    value: raw.clone(),
                    reason: err.to_string(),
                }
            })?;
            if !rate.is_finite() || rate < 0.0 {
                return Err(ConfigError::Invalid {
                    var: DEFAULT_RATE_VAR,
                    value: raw,
                    reason: "rate must be a non-negative number".into(),
                });
            }
            config.default_rate = Some(rate);
        }

        Ok(config)
    }
}
