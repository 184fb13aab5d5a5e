use std::sync::RwLock;

use pharmastock_inventory::Movement;
use pharmastock_products::Product;

use super::{Collection, InventoryStore, StoreError};

/// In-memory store.
///
/// Intended for tests/dev. Collections exist from construction, so
/// `initialize` has nothing to create.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    products: RwLock<Vec<Product>>,
    movements: RwLock<Vec<Movement>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed both collections (test fixtures).
    pub fn with_data(products: Vec<Product>, movements: Vec<Movement>) -> Self {
        Self {
            products: RwLock::new(products),
            movements: RwLock::new(movements),
        }
    }
}

impl InventoryStore for InMemoryStore {
    fn initialize(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn load_products(&self) -> Result<Vec<Product>, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|_| StoreError::read(Collection::Products, "lock poisoned"))?;
        Ok(products.clone())
    }

    fn load_movements(&self) -> Result<Vec<Movement>, StoreError> {
        let movements = self
            .movements
            .read()
            .map_err(|_| StoreError::read(Collection::Movements, "lock poisoned"))?;
        Ok(movements.clone())
    }

    fn save_products(&self, products: &[Product]) -> Result<(), StoreError> {
        let mut current = self
            .products
            .write()
            .map_err(|_| StoreError::write(Collection::Products, "lock poisoned"))?;
        *current = products.to_vec();
        Ok(())
    }

    fn save_movements(&self, movements: &[Movement]) -> Result<(), StoreError> {
        let mut current = self
            .movements
            .write()
            .map_err(|_| StoreError::write(Collection::Movements, "lock poisoned"))?;
        *current = movements.to_vec();
        Ok(())
    }
}
