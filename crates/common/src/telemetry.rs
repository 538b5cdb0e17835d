use opentelemetry::global;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub log_level: String,
    pub jaeger_endpoint: Option<String>,
    pub enable_jaeger: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "query-service".to_string(),
            log_level: "info".to_string(),
            jaeger_endpoint: Some("localhost:6831".to_string()),
            enable_jaeger: false,
        }
    }
}

impl TelemetryConfig {
    /// Telemetry settings for a named service out of the loaded app configuration
    pub fn for_service(service_name: &str, config: &AppConfig) -> Self {
        Self {
            service_name: service_name.to_string(),
            log_level: config.log_level.clone(),
            jaeger_endpoint: config.jaeger_endpoint.clone(),
            enable_jaeger: config.enable_jaeger,
        }
    }
}

/// Initialize tracing/logging for the application with optional Jaeger support
pub fn init_telemetry(
    config: TelemetryConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .json();

    if config.enable_jaeger {
        let tracer = opentelemetry_jaeger::new_agent_pipeline()
            .with_service_name(&config.service_name)
            .with_endpoint(config.jaeger_endpoint.unwrap_or_else(|| "localhost:6831".to_string()))
            .install_batch(opentelemetry_sdk::runtime::Tokio)?;

        let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(telemetry_layer)
            .try_init()?;

        tracing::info!(
            "Telemetry initialized with Jaeger tracing for service: {}",
            config.service_name
        );
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        tracing::info!(
            "Telemetry initialized without Jaeger for service: {}",
            config.service_name
        );
    }

    Ok(())
}

/// Initialize plain JSON logging, ignoring a subscriber that is already installed
pub fn init_basic_telemetry(log_level: &str) {
    let config = TelemetryConfig {
        log_level: log_level.to_string(),
        jaeger_endpoint: None,
        ..Default::default()
    };

    let _ = init_telemetry(config);
}

/// Shutdown telemetry gracefully
pub fn shutdown_telemetry() {
    global::shutdown_tracer_provider();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "query-service");
        assert_eq!(config.log_level, "info");
        assert!(!config.enable_jaeger);
    }

    #[test]
    fn test_config_for_service() {
        let app = AppConfig {
            log_level: "debug".to_string(),
            enable_jaeger: true,
            jaeger_endpoint: Some("jaeger:6831".to_string()),
            ..Default::default()
        };

        let config = TelemetryConfig::for_service("reports", &app);
        assert_eq!(config.service_name, "reports");
        assert_eq!(config.log_level, "debug");
        assert!(config.enable_jaeger);
        assert_eq!(config.jaeger_endpoint.as_deref(), Some("jaeger:6831"));
    }

    #[test]
    fn test_init_basic_telemetry_twice() {
        init_basic_telemetry("debug");
        init_basic_telemetry("debug");
    }
}
