use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
};

/// Used when `RUST_LOG` is unset or does not parse.
const DEFAULT_DIRECTIVE: &str = "info";

/// Installs the global subscriber.
///
/// Events go to stderr so stdout carries only the phase report lines and the
/// timing summary. At `debug` or finer, closing spans are logged with their
/// busy/idle time, splitting each phase into its read, filter and write stages.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let span_events = match filter.max_level_hint() {
        Some(level) if level >= LevelFilter::DEBUG => FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    // A second call keeps the first subscriber installed.
    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        tracing::info!("logger installed");
    }
}
