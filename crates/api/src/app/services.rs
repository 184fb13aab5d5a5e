use std::sync::Arc;

use pharmastock_infra::{CsvStore, InventoryService, InventoryStore, StoreConfig, StoreError};

/// The service as seen by handlers; the concrete store is picked at startup.
pub type AppServices = InventoryService<Arc<dyn InventoryStore>>;

pub type SharedServices = Arc<AppServices>;

/// Open the CSV store described by `config` and wrap it in the service.
///
/// Missing files are created with their header rows.
pub fn build_services(config: StoreConfig) -> Result<SharedServices, StoreError> {
    tracing::info!(
        products = %config.products_path.display(),
        movements = %config.movements_path.display(),
        "opening csv store"
    );
    from_store(Arc::new(CsvStore::new(config)))
}

/// Wrap an already constructed store.
pub fn from_store(store: Arc<dyn InventoryStore>) -> Result<SharedServices, StoreError> {
    Ok(Arc::new(InventoryService::new(store)?))
}
