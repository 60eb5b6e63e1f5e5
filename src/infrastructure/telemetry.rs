use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. Call once, from a binary's `main`.
///
/// The filter comes from `RUST_LOG`, then `LOGGING_LEVEL` (`DEBUG`,
/// `INFO`, ...), then `default_directive`. `LOG_FORMAT=json` emits JSON
/// lines.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        filter_from_level(std::env::var("LOGGING_LEVEL").ok().as_deref())
            .unwrap_or_else(|| default_directive.into())
    });

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn filter_from_level(level: Option<&str>) -> Option<EnvFilter> {
    let level = level?.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Some(EnvFilter::new(level)),
        "warning" => Some(EnvFilter::new("warn")),
        "critical" => Some(EnvFilter::new("error")),
        _ => None,
    }
}
