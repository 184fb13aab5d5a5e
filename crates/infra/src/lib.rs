//! Infrastructure layer: durable storage, configuration, request execution.

pub mod config;
#[cfg(test)]
mod integration_tests;
pub mod services;
pub mod store;

pub use config::StoreConfig;
pub use services::{InventoryService, ServiceError};
pub use store::{Collection, CsvStore, InMemoryStore, InventoryStore, StoreError};
