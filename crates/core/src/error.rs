//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// uniqueness, referential integrity). Storage concerns belong elsewhere.
///
/// Every variant carries the human-readable rejection text that is shown to
/// whoever issued the request; see [`DomainError::reason`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty SKU, non-positive quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A uniqueness rule was violated (e.g. duplicate SKU in the catalog).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A referenced record does not exist (e.g. movement for an unknown SKU).
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// The rejection text without the category prefix.
    pub fn reason(&self) -> &str {
        match self {
            DomainError::Validation(msg) | DomainError::Conflict(msg) | DomainError::NotFound(msg) => {
                msg
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_strips_category_prefix() {
        let err = DomainError::conflict("SKU A1 already exists");
        assert_eq!(err.to_string(), "conflict: SKU A1 already exists");
        assert_eq!(err.reason(), "SKU A1 already exists");
    }

    #[test]
    fn constructors_pick_the_matching_variant() {
        assert!(matches!(DomainError::validation("x"), DomainError::Validation(_)));
        assert!(matches!(DomainError::not_found("x"), DomainError::NotFound(_)));
    }
}
