use crate::config::LogFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Logs go to stderr so stdout stays free for command output.
pub fn init_tracing(service_name: &str, log_level: &str, log_format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true);

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match log_format {
        LogFormat::Json => registry.with(fmt_layer.json().flatten_event(true)).try_init(),
        LogFormat::Pretty => registry.with(fmt_layer.compact()).try_init(),
    };

    if let Err(e) = result {
        eprintln!(
            "Failed to install tracing subscriber for service '{}': {}",
            service_name, e
        );
        return;
    }

    tracing::debug!(service = %service_name, ?log_format, "Tracing initialized");
}
