//! Stock-keeping unit identifier.

use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Identifier of a catalog product.
///
/// Surrounding whitespace is trimmed on construction (scanner input usually
/// ends with a newline). After trimming, comparison is exact and
/// case-sensitive. An empty SKU is never constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Sku {}

impl core::fmt::Display for Sku {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Sku {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Sku {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Sku::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let sku = Sku::parse("  A1\n").unwrap();
        assert_eq!(sku.as_str(), "A1");
    }

    #[test]
    fn empty_or_blank_sku_is_rejected() {
        for raw in ["", "   ", "\t\n"] {
            match Sku::parse(raw) {
                Err(DomainError::Validation(msg)) => assert!(msg.contains("empty")),
                other => panic!("expected validation error for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert_ne!(Sku::parse("a1").unwrap(), Sku::parse("A1").unwrap());
    }

    #[test]
    fn deserialize_applies_the_same_rules() {
        let sku: Sku = serde_json::from_str("\" B9 \"").unwrap();
        assert_eq!(sku.as_str(), "B9");
        assert!(serde_json::from_str::<Sku>("\"\"").is_err());
    }
}
