//! Store configuration.
//!
//! Resource locations are passed into the store at construction; nothing reads
//! process-wide paths behind the caller's back.

use std::path::{Path, PathBuf};

/// Default product collection file, relative to the working directory.
pub const DEFAULT_PRODUCTS_FILE: &str = "productos.csv";

/// Default movement collection file, relative to the working directory.
pub const DEFAULT_MOVEMENTS_FILE: &str = "movimientos.csv";

pub const PRODUCTS_PATH_ENV: &str = "PHARMASTOCK_PRODUCTS_CSV";
pub const MOVEMENTS_PATH_ENV: &str = "PHARMASTOCK_MOVEMENTS_CSV";

/// Locations of the two durable collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub products_path: PathBuf,
    pub movements_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PRODUCTS_FILE, DEFAULT_MOVEMENTS_FILE)
    }
}

impl StoreConfig {
    pub fn new(products_path: impl Into<PathBuf>, movements_path: impl Into<PathBuf>) -> Self {
        Self {
            products_path: products_path.into(),
            movements_path: movements_path.into(),
        }
    }

    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(DEFAULT_PRODUCTS_FILE), dir.join(DEFAULT_MOVEMENTS_FILE))
    }

    /// Defaults, overridden by `PHARMASTOCK_PRODUCTS_CSV` / `PHARMASTOCK_MOVEMENTS_CSV`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let pick = |key: &str, default: PathBuf| match lookup(key) {
            Some(v) if !v.trim().is_empty() => PathBuf::from(v),
            _ => default,
        };

        Self {
            products_path: pick(PRODUCTS_PATH_ENV, defaults.products_path),
            movements_path: pick(MOVEMENTS_PATH_ENV, defaults.movements_path),
        }
    }
}
