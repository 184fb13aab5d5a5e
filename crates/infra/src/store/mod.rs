//! Full-collection storage boundary.
//!
//! The inventory keeps two collections, the product catalog and the movement
//! ledger. Storage only knows how to read a whole collection and how to
//! overwrite a whole collection; every mutation is a load, change in memory,
//! save cycle driven by [`crate::services::InventoryService`].

pub mod csv_store;
pub mod in_memory;

pub use csv_store::CsvStore;
pub use in_memory::InMemoryStore;

use std::sync::Arc;

use thiserror::Error;

use pharmastock_inventory::Movement;
use pharmastock_products::Product;

/// Which of the two durable collections an operation touched.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Movements,
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Collection::Products => f.write_str("products"),
            Collection::Movements => f.write_str("movements"),
        }
    }
}

/// Storage operation error.
///
/// These are **infrastructure errors** (missing, corrupt or unwritable backing
/// resource) as opposed to domain errors (duplicate SKU, unknown SKU).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {collection}: {reason}")]
    Read { collection: Collection, reason: String },

    #[error("failed to write {collection}: {reason}")]
    Write { collection: Collection, reason: String },
}

impl StoreError {
    pub fn read(collection: Collection, reason: impl core::fmt::Display) -> Self {
        Self::Read {
            collection,
            reason: reason.to_string(),
        }
    }

    pub fn write(collection: Collection, reason: impl core::fmt::Display) -> Self {
        Self::Write {
            collection,
            reason: reason.to_string(),
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            StoreError::Read { collection, .. } | StoreError::Write { collection, .. } => *collection,
        }
    }
}

/// Durable home of the product catalog and the movement ledger.
///
/// ## Semantics
///
/// - `initialize()` creates missing collections with their schema and zero
///   rows. It never touches a collection that already exists, so it is safe to
///   call on every startup.
/// - `load_*` returns the whole collection in stored order.
/// - `save_*` replaces the whole collection (no append, no in-place patch).
///
/// Implementations do not coordinate concurrent writers; serialization of
/// read-modify-write cycles is the caller's job.
pub trait InventoryStore: Send + Sync {
    fn initialize(&self) -> Result<(), StoreError>;

    fn load_products(&self) -> Result<Vec<Product>, StoreError>;

    fn load_movements(&self) -> Result<Vec<Movement>, StoreError>;

    fn save_products(&self, products: &[Product]) -> Result<(), StoreError>;

    fn save_movements(&self, movements: &[Movement]) -> Result<(), StoreError>;
}

impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    fn initialize(&self) -> Result<(), StoreError> {
        (**self).initialize()
    }

    fn load_products(&self) -> Result<Vec<Product>, StoreError> {
        (**self).load_products()
    }

    fn load_movements(&self) -> Result<Vec<Movement>, StoreError> {
        (**self).load_movements()
    }

    fn save_products(&self, products: &[Product]) -> Result<(), StoreError> {
        (**self).save_products(products)
    }

    fn save_movements(&self, movements: &[Movement]) -> Result<(), StoreError> {
        (**self).save_movements(movements)
    }
}
