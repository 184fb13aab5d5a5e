//! Inventory domain module (append-only movement ledger).
//!
//! This crate contains business rules for stock movements and stock derivation,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod movement;
pub mod stock;

pub use movement::{
    Ledger, Movement, MovementKind, Quantity, RecordMovement, MAX_QUANTITY, TIMESTAMP_FORMAT,
};
pub use stock::{compute_stock, stock_levels, stock_table, StockRow};
