use std::time::Duration;

use thiserror::Error;

use crate::logging::LoggingConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("invalid PRICE_PROVIDER: {0}. Must be 'yahoo' or 'mock'")]
    InvalidProvider(String),
    #[error("invalid LOKI_URL {value:?}: {source}")]
    InvalidLokiUrl { value: String, source: url::ParseError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Yahoo,
    Mock,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Yahoo => "yahoo",
            ProviderKind::Mock => "mock",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub provider: ProviderKind,
    pub fetch_timeout: Duration,
    pub price_cache_ttl: Duration,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            provider: ProviderKind::Yahoo,
            fetch_timeout: Duration::from_secs(15),
            price_cache_ttl: Duration::from_secs(3600),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let number = |name: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(name) {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber { name, value }),
                None => Ok(default),
            }
        };

        let provider = match lookup("PRICE_PROVIDER") {
            None => defaults.provider,
            Some(name) => match name.to_lowercase().as_str() {
                "yahoo" => ProviderKind::Yahoo,
                "mock" => ProviderKind::Mock,
                _ => return Err(ConfigError::InvalidProvider(name)),
            },
        };

        let port = number("PORT", defaults.port as u64)?;
        let port = u16::try_from(port).map_err(|_| ConfigError::InvalidNumber {
            name: "PORT",
            value: port.to_string(),
        })?;

        let loki_url = match lookup("LOKI_URL").filter(|v| !v.trim().is_empty()) {
            Some(value) => Some(
                url::Url::parse(value.trim())
                    .map_err(|source| ConfigError::InvalidLokiUrl { value, source })?,
            ),
            None => None,
        };

        let logging = LoggingConfig {
            filter: lookup("RUST_LOG").unwrap_or(defaults.logging.filter),
            service_name: lookup("SERVICE_NAME").unwrap_or(defaults.logging.service_name),
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.logging.environment),
            loki_url,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            provider,
            fetch_timeout: Duration::from_secs(number(
                "FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )?),
            price_cache_ttl: Duration::from_secs(number(
                "PRICE_CACHE_TTL_SECS",
                defaults.price_cache_ttl.as_secs(),
            )?),
            logging,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
