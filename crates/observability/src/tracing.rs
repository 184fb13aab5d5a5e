//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log line format (`json` or `text`).
pub const LOG_FORMAT_ENV: &str = "PHARMASTOCK_LOG_FORMAT";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line (default).
    #[default]
    Json,
    /// Human-readable lines for local runs.
    Text,
}

impl LogFormat {
    /// Anything other than `text` (case-insensitive) means JSON.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if v.trim().eq_ignore_ascii_case("text") => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_FORMAT_ENV).ok().as_deref())
    }
}

/// Initialize tracing/logging for the process.
///
/// Filtering follows `RUST_LOG` (default `info`). Safe to call multiple times
/// (subsequent calls are no-ops).
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
}
