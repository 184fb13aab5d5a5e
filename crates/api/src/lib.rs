//! HTTP API: server, routing, and request/response mapping.

pub mod app;

/// Environment variable holding the listen address.
pub const BIND_ENV: &str = "PHARMASTOCK_BIND";

/// Listen address used when `PHARMASTOCK_BIND` is unset.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
