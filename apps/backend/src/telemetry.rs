use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Used when `RUST_LOG` is unset. State polls log at debug and stay hidden.
const DEFAULT_FILTER: &str = "info,actix_server=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Json,
    Pretty,
}

/// `FITCHECK_LOG_FORMAT=pretty` switches to human-readable lines; anything
/// else keeps JSON.
fn log_format(raw: Option<&str>) -> LogFormat {
    match raw.map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("pretty") => LogFormat::Pretty,
        _ => LogFormat::Json,
    }
}

pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let format = log_format(std::env::var("FITCHECK_LOG_FORMAT").ok().as_deref());

    let base = fmt::layer().with_target(false).with_ansi(false);
    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry.with(base.json()).init(),
        LogFormat::Pretty => registry.with(base.compact()).init(),
    }
}
