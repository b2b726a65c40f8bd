use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;

/// Logging settings, read together with the rest of [`AppConfig`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, `RUST_LOG` syntax
    pub filter: String,
    pub service_name: String,
    pub environment: String,
    /// Loki push endpoint. Unset keeps logging on the console.
    pub loki_url: Option<url::Url>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            service_name: "asset-visualizer".to_string(),
            environment: "development".to_string(),
            loki_url: None,
        }
    }
}

/// Stream labels attached to every line shipped to Loki.
#[cfg_attr(not(feature = "loki"), allow(dead_code))]
pub fn loki_labels(config: &AppConfig) -> Vec<(&'static str, String)> {
    vec![
        ("service", config.logging.service_name.clone()),
        ("environment", config.logging.environment.clone()),
        ("provider", config.provider.as_str().to_string()),
        ("version", env!("CARGO_PKG_VERSION").to_string()),
    ]
}

pub fn init_logging(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let logging = &config.logging;
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::new(&logging.filter))
        .with(tracing_subscriber::fmt::layer());

    #[cfg(feature = "loki")]
    {
        if let Some(url) = logging.loki_url.clone() {
            let mut builder = tracing_loki::builder();
            for (name, value) in loki_labels(config) {
                builder = builder.label(name, value)?;
            }
            let (loki_layer, task) = builder.build_url(url.clone())?;

            // Background task that ships logs to Loki
            tokio::spawn(task);
            registry.with(loki_layer).try_init()?;

            tracing::info!("✅ Loki logging initialized at {} ({})", url, logging.environment);
            return Ok(());
        }
    }

    registry.try_init()?;

    #[cfg(not(feature = "loki"))]
    {
        if logging.loki_url.is_some() {
            tracing::warn!("LOKI_URL is set but this build has no `loki` feature; logging to console only");
        }
    }

    tracing::info!("📊 Console logging initialized ({})", logging.environment);
    Ok(())
}
