//! Request execution (application-level orchestration).
//!
//! `InventoryService` is the functional surface any presentation layer calls:
//! add a product, record a movement, read the stock table. Each mutating call
//! runs one full read-modify-write cycle against the store:
//!
//! ```text
//! Request
//!   ↓
//! 1. Parse boundary values (SKU)
//!   ↓
//! 2. Load the full collections from the store
//!   ↓
//! 3. Decide (pure domain logic: Catalog / Ledger)
//!   ↓
//! 4. Persist the full collection back (only when accepted)
//!   ↓
//! 5. Reply with a human-readable message
//! ```
//!
//! Rejections (duplicate SKU, unknown SKU, invalid input) never touch storage.
//! Storage failures are returned to the caller; nothing is retried.
//!
//! Mutating cycles are serialized by a single-writer lock so two concurrent
//! requests in this process cannot lose each other's update. Reads do not take
//! the lock and see the last completed write. Writers in other processes are
//! not coordinated.

use std::sync::{Mutex, PoisonError};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;

use pharmastock_core::{DomainError, Sku};
use pharmastock_inventory::{
    compute_stock, stock_table, Ledger, Movement, MovementKind, Quantity, RecordMovement, StockRow,
};
use pharmastock_products::{AddProduct, Catalog, Product};

use crate::store::{InventoryStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was refused; nothing was written.
    #[error(transparent)]
    Rejected(#[from] DomainError),

    /// The store could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Text to show the user when the request was refused.
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            ServiceError::Rejected(e) => Some(e.reason()),
            ServiceError::Store(_) => None,
        }
    }
}

type Clock = Box<dyn Fn() -> NaiveDateTime + Send + Sync>;

pub struct InventoryService<S> {
    store: S,
    write_lock: Mutex<()>,
    clock: Clock,
}

impl<S> core::fmt::Debug for InventoryService<S>
where
    S: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryService")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<S> InventoryService<S>
where
    S: InventoryStore,
{
    /// Wrap a store, creating its collections if they do not exist yet.
    pub fn new(store: S) -> Result<Self, StoreError> {
        store.initialize()?;
        Ok(Self {
            store,
            write_lock: Mutex::new(()),
            clock: Box::new(|| Local::now().naive_local()),
        })
    }

    /// Replace the clock used to stamp movements (local time by default).
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// AddProduct: register a new catalog entry.
    pub fn add_product(
        &self,
        sku: &str,
        name: &str,
        category: &str,
        unit: &str,
    ) -> Result<String, ServiceError> {
        let sku = Sku::parse(sku).inspect_err(log_rejection)?;
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut catalog = Catalog::new(self.store.load_products()?);
        let product = catalog
            .add(AddProduct {
                sku,
                name: name.to_string(),
                category: category.to_string(),
                unit: unit.to_string(),
            })
            .inspect_err(log_rejection)?;
        let message = format!("Product added: {} (SKU: {})", product.name(), product.sku());
        let added = product.sku().clone();

        self.store.save_products(catalog.products())?;
        tracing::info!(sku = %added, products = catalog.len(), "product added");
        Ok(message)
    }

    /// RecordMovement: append one inward/outward entry to the ledger.
    pub fn record_movement(
        &self,
        kind: MovementKind,
        sku: &str,
        quantity: Quantity,
        notes: &str,
    ) -> Result<String, ServiceError> {
        let sku = Sku::parse(sku).inspect_err(log_rejection)?;
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let catalog = Catalog::new(self.store.load_products()?);
        let mut ledger = Ledger::new(self.store.load_movements()?);
        let movement = ledger
            .record(
                &catalog,
                RecordMovement {
                    kind,
                    sku,
                    quantity,
                    notes: notes.to_string(),
                    occurred_at: (self.clock)(),
                },
            )
            .inspect_err(log_rejection)?;
        let message = format!(
            "Movement recorded: {} of {} units for SKU {}",
            movement.kind(),
            movement.quantity(),
            movement.sku()
        );
        let recorded_sku = movement.sku().clone();

        self.store.save_movements(ledger.movements())?;
        tracing::info!(
            sku = %recorded_sku,
            kind = %kind,
            quantity = quantity.get(),
            movements = ledger.len(),
            "movement recorded"
        );
        Ok(message)
    }

    /// GetStockTable: one row per product, catalog order.
    pub fn stock_table(&self) -> Result<Vec<StockRow>, ServiceError> {
        let products = self.store.load_products()?;
        let movements = self.store.load_movements()?;
        Ok(stock_table(&products, &movements))
    }

    /// Current stock of one catalog product, as its stock-table row.
    ///
    /// The row carries the catalog's SKU, not the caller's raw text.
    pub fn stock_for(&self, sku: &str) -> Result<StockRow, ServiceError> {
        let sku = Sku::parse(sku)?;
        let catalog = Catalog::new(self.store.load_products()?);
        let Some(product) = catalog.get(&sku) else {
            return Err(DomainError::not_found(format!("SKU {sku} not found")).into());
        };
        let movements = self.store.load_movements()?;
        Ok(StockRow {
            sku: product.sku().clone(),
            name: product.name().to_string(),
            category: product.category().to_string(),
            unit: product.unit().to_string(),
            stock: compute_stock(&sku, &movements),
        })
    }

    /// The catalog in stored order.
    pub fn products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.store.load_products()?)
    }

    /// The ledger in insertion order, optionally limited to one SKU.
    pub fn movements(&self, sku: Option<&str>) -> Result<Vec<Movement>, ServiceError> {
        let filter = sku.map(Sku::parse).transpose()?;
        let mut movements = self.store.load_movements()?;
        if let Some(sku) = filter {
            movements.retain(|m| m.sku() == &sku);
        }
        Ok(movements)
    }
}

fn log_rejection(err: &DomainError) {
    tracing::debug!(reason = err.reason(), "request rejected");
}
