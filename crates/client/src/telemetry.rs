//! Tracing subscriber setup and trace context propagation.
//!
//! Installs an `EnvFilter`-driven subscriber that logs to stderr in pretty or
//! JSON form, optionally exporting spans over OTLP.
//!
//! # Usage
//!
//! ```rust,ignore
//! use maintdesk_client::telemetry::{LogFormat, TracingConfig};
//!
//! let guard = TracingConfig::new()
//!     .with_log_format(LogFormat::Json)
//!     .with_otlp_endpoint("http://localhost:4317")
//!     .init()?;
//! // Run application...
//! guard.shutdown();
//! ```

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use opentelemetry::propagation::TextMapPropagator;
use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

/// Configuration for logging and optional OpenTelemetry export.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// OTLP endpoint (e.g., "http://localhost:4317")
    pub otlp_endpoint: Option<String>,
    pub service_name: String,
    pub service_version: String,
    pub log_format: LogFormat,
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
    /// Export timeout for the OTLP exporter.
    pub timeout: Duration,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: None,
            service_name: "maintdesk".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_format: LogFormat::Pretty,
            default_filter: "warn".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    /// Install the global subscriber.
    ///
    /// # Errors
    /// Returns an error if the OTLP pipeline fails to initialize or a global
    /// subscriber is already set.
    pub fn init(&self) -> Result<TracingGuard, TracingError> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.default_filter));

        let provider = match &self.otlp_endpoint {
            Some(endpoint) => Some(self.create_tracer_provider(endpoint)?),
            None => None,
        };
        let otel_layer = provider.as_ref().map(|provider| {
            tracing_opentelemetry::layer().with_tracer(provider.tracer("maintdesk-client"))
        });

        let (pretty_layer, json_layer) = match self.log_format {
            LogFormat::Pretty => (Some(fmt::layer().with_writer(std::io::stderr)), None),
            LogFormat::Json => (
                None,
                Some(fmt::layer().json().with_writer(std::io::stderr)),
            ),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(otel_layer)
            .with(pretty_layer)
            .with(json_layer)
            .try_init()
            .map_err(|e| TracingError::InitError(e.to_string()))?;

        if provider.is_some() {
            opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());
        }

        Ok(TracingGuard { provider })
    }

    fn create_tracer_provider(&self, endpoint: &str) -> Result<SdkTracerProvider, TracingError> {
        use opentelemetry_otlp::{Protocol, WithExportConfig};
        use opentelemetry_sdk::trace::{BatchConfig, BatchSpanProcessor, Sampler};

        let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .with_timeout(self.timeout)
            .with_protocol(Protocol::Grpc)
            .build()
            .map_err(|e| TracingError::InitError(e.to_string()))?;

        let batch_processor = BatchSpanProcessor::builder(otlp_exporter)
            .with_batch_config(BatchConfig::default())
            .build();

        let resource = opentelemetry_sdk::Resource::builder()
            .with_attributes(vec![
                opentelemetry::KeyValue::new("service.name", self.service_name.clone()),
                opentelemetry::KeyValue::new("service.version", self.service_version.clone()),
            ])
            .build();

        Ok(SdkTracerProvider::builder()
            .with_span_processor(batch_processor)
            .with_resource(resource)
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
            .build())
    }
}

/// Keeps the tracer provider alive until shutdown.
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
}

impl TracingGuard {
    /// Flush pending spans.
    pub fn shutdown(&self) {
        if let Some(provider) = &self.provider {
            let _ = provider.shutdown();
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Failed to initialize tracing: {0}")]
    InitError(String),
}

/// Add W3C trace context headers (`traceparent`) for the current span.
///
/// Without an active OpenTelemetry span nothing is added.
pub fn inject_trace_context(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    let context = tracing::Span::current().context();
    let mut headers = HashMap::new();
    TraceContextPropagator::new().inject_context(&context, &mut headers);

    headers
        .into_iter()
        .fold(builder, |builder, (key, value)| builder.header(key, value))
}
