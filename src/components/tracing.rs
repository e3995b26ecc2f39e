use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

const SERVICE_NAME: &str = "friends-service";

/// Installs the global subscriber: bunyan JSON lines on stdout, filtered by
/// `RUST_LOG` (defaults to `info`), with `log` records forwarded to tracing.
/// Calling it again is a no-op.
pub fn init_telemetry() {
    if LogTracer::init().is_err() {
        log::debug!("Log tracer already set");
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let formatting_layer = BunyanFormattingLayer::new(SERVICE_NAME.into(), std::io::stdout);

    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        log::debug!("Tracing subscriber already set");
    }
}
