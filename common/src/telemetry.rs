// Telemetry module for structured logging, metrics, and tracing

use anyhow::Result;
use metrics::{counter, describe_counter, histogram, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    trace::{RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, ObservabilityConfig};

const SERVICE_NAME: &str = "meet-sync";

/// Initialize structured logging
///
/// This function sets up the tracing subscriber with:
/// - JSON or human-readable formatting, per configuration
/// - Log levels from `RUST_LOG` or, failing that, configuration
/// - Optional OpenTelemetry integration when a tracing endpoint is set
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(false)
            .with_filter(env_filter)
            .boxed(),
    };

    let registry = tracing_subscriber::registry().with(fmt_layer);

    if let Some(endpoint) = config.tracing_endpoint.as_deref() {
        let tracer = init_tracer(endpoint)?;
        let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);
        registry
            .with(telemetry_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;
    } else {
        registry
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;
    }

    tracing::info!(
        log_level = %config.log_level,
        log_format = ?config.log_format,
        tracing_endpoint = config.tracing_endpoint.as_deref(),
        "Logging initialized"
    );

    Ok(())
}

/// Initialize OpenTelemetry tracer with OTLP exporter
fn init_tracer(endpoint: &str) -> Result<opentelemetry_sdk::trace::Tracer> {
    use opentelemetry_sdk::runtime::Tokio;

    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint)
        .build_span_exporter()
        .map_err(|e| anyhow::anyhow!("Failed to build span exporter: {}", e))?;

    let tracer_provider = TracerProvider::builder()
        .with_batch_exporter(exporter, Tokio)
        .with_config(
            opentelemetry_sdk::trace::Config::default()
                .with_sampler(Sampler::AlwaysOn)
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(Resource::new(vec![
                    KeyValue::new("service.name", SERVICE_NAME),
                    KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                ])),
        )
        .build();

    global::set_tracer_provider(tracer_provider.clone());
    let tracer = tracer_provider.tracer(SERVICE_NAME);

    Ok(tracer)
}

/// Shutdown OpenTelemetry tracer provider
///
/// This should be called on graceful shutdown to flush remaining spans
pub fn shutdown_tracer() {
    global::shutdown_tracer_provider();
}

/// Install the Prometheus recorder and describe the service metrics.
///
/// The returned handle renders the exposition text for `/metrics`.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    describe_counter!("events_created_total", "Total number of events created");
    describe_histogram!(
        "event_dates_per_event",
        "Number of candidate dates attached to each created event"
    );
    describe_counter!(
        "event_lookups_total",
        "Event reads, labelled by outcome (found, not_found, error)"
    );
    describe_counter!(
        "event_validation_failures_total",
        "Create requests rejected by validation"
    );

    tracing::info!("Prometheus metrics recorder installed");
    Ok(handle)
}

/// Record a successfully created event
#[inline]
pub fn record_event_created(date_count: usize) {
    counter!("events_created_total").increment(1);
    histogram!("event_dates_per_event").record(date_count as f64);
}

/// Record the outcome of an event read
#[inline]
pub fn record_event_lookup(outcome: &'static str) {
    counter!("event_lookups_total", "outcome" => outcome).increment(1);
}

/// Record a create request rejected by validation
#[inline]
pub fn record_validation_failure() {
    counter!("event_validation_failures_total").increment(1);
}
