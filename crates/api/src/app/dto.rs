use serde::Deserialize;

use pharmastock_core::DomainError;
use pharmastock_inventory::{MovementKind, Quantity};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub unit: String,
}

/// Quantity as submitted: a JSON number, or text from a form field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(f64),
    Text(String),
}

/// Kind and quantity arrive loosely typed so that bad values get the same
/// `validation_error` body as every other rejection.
#[derive(Debug, Deserialize)]
pub struct RecordMovementRequest {
    pub kind: String,
    pub sku: String,
    pub quantity: QuantityInput,
    #[serde(default)]
    pub notes: String,
}

impl RecordMovementRequest {
    pub fn kind(&self) -> Result<MovementKind, DomainError> {
        self.kind.parse()
    }

    pub fn quantity(&self) -> Result<Quantity, DomainError> {
        match &self.quantity {
            QuantityInput::Number(units) => Quantity::from_f64(*units),
            QuantityInput::Text(raw) => Quantity::parse(raw),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MovementsQuery {
    pub sku: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_request_accepts_either_kind_spelling() {
        let req: RecordMovementRequest =
            serde_json::from_str(r#"{"kind":"Entrada","sku":"A1","quantity":10}"#).unwrap();
        assert_eq!(req.kind().unwrap(), MovementKind::Inward);
        assert_eq!(req.quantity().unwrap().get(), 10);
        assert_eq!(req.notes, "");

        let req: RecordMovementRequest =
            serde_json::from_str(r#"{"kind":"outward","sku":"A1","quantity":3.0,"notes":"sold"}"#).unwrap();
        assert_eq!(req.kind().unwrap(), MovementKind::Outward);
        assert_eq!(req.quantity().unwrap().get(), 3);
    }

    #[test]
    fn quantity_may_arrive_as_text() {
        let req: RecordMovementRequest =
            serde_json::from_str(r#"{"kind":"Entrada","sku":"A1","quantity":"12"}"#).unwrap();
        assert_eq!(req.quantity().unwrap().get(), 12);

        let req: RecordMovementRequest =
            serde_json::from_str(r#"{"kind":"Entrada","sku":"A1","quantity":"ten"}"#).unwrap();
        assert!(matches!(req.quantity(), Err(DomainError::Validation(_))));

        let req: RecordMovementRequest =
            serde_json::from_str(r#"{"kind":"Entrada","sku":"A1","quantity":9.2e18}"#).unwrap();
        assert!(matches!(req.quantity(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn movement_request_rejects_fractional_and_unknown_kind() {
        let req: RecordMovementRequest =
            serde_json::from_str(r#"{"kind":"Transfer","sku":"A1","quantity":2.5}"#).unwrap();
        assert!(matches!(req.kind(), Err(DomainError::Validation(_))));
        assert!(matches!(req.quantity(), Err(DomainError::Validation(_))));
    }
}
