//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Verbosity comes from the `-v`/`-q` flags; `RUST_LOG` overrides it when
//! the flags are absent. Log output goes to stderr so tables on stdout
//! stay pipeable.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level filter derived from the CLI flags.
    pub level_filter: LevelFilter,
    /// Whether `RUST_LOG` may override the flag-derived level.
    pub use_env_filter: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup, before any engine work.
pub fn init_logging(config: &LogConfig) {
    let filter = build_env_filter(config);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::new(config.level_filter.to_string().to_lowercase())
}
