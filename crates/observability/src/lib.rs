//! Tracing and logging (shared setup).

/// Tracing configuration (filters, formats).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide logging, format chosen by `PHARMASTOCK_LOG_FORMAT`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
