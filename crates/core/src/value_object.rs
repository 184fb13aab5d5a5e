//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity**. They are defined
//! entirely by their attribute values: two `Sku`s holding the same text are the
//! same SKU, two `Quantity`s holding the same amount are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. Construction is where validation happens, so a value object
/// that exists is a valid one.
///
/// ## Value objects vs records
///
/// - **Value Object**: no identity (`Sku`, `Quantity`, `MovementKind`)
/// - **Record**: has identity (`Product`, keyed by its `Sku` in the catalog)
///
/// ```ignore
/// let a = Sku::parse("A1")?;
/// let b = Sku::parse(" A1 ")?;
/// assert_eq!(a, b); // equal by value
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
