//! `pharmastock-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod sku;
pub mod value_object;

pub use error::DomainError;
pub use sku::Sku;
pub use value_object::ValueObject;
