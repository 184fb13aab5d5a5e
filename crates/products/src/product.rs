use serde::Serialize;

use pharmastock_core::{DomainError, Sku};

/// Catalog entry.
///
/// Immutable once created: the catalog has no update or delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    sku: Sku,
    name: String,
    category: String,
    unit: String,
}

impl Product {
    pub fn new(
        sku: Sku,
        name: impl Into<String>,
        category: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            sku,
            name: name.into(),
            category: category.into(),
            unit: unit.into(),
        }
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Dispensing unit (box, bottle, blister...).
    pub fn unit(&self) -> &str {
        &self.unit
    }
}

/// Command: AddProduct.
///
/// Name, category and unit are free text; empty strings are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddProduct {
    pub sku: Sku,
    pub name: String,
    pub category: String,
    pub unit: String,
}

/// The product collection, in stored order.
///
/// Holds no state between requests: callers load it, apply one command and
/// persist [`Catalog::products`] back as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn contains(&self, sku: &Sku) -> bool {
        self.products.iter().any(|p| p.sku() == sku)
    }

    pub fn get(&self, sku: &Sku) -> Option<&Product> {
        self.products.iter().find(|p| p.sku() == sku)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Append a new product, enforcing SKU uniqueness.
    ///
    /// On rejection the catalog is left untouched.
    pub fn add(&mut self, cmd: AddProduct) -> Result<&Product, DomainError> {
        if self.contains(&cmd.sku) {
            return Err(DomainError::conflict(format!("SKU {} already exists", cmd.sku)));
        }

        self.products
            .push(Product::new(cmd.sku, cmd.name, cmd.category, cmd.unit));
        Ok(&self.products[self.products.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sku(raw: &str) -> Sku {
        Sku::parse(raw).unwrap()
    }

    fn add_cmd(raw_sku: &str, name: &str) -> AddProduct {
        AddProduct {
            sku: sku(raw_sku),
            name: name.to_string(),
            category: "Analgesic".to_string(),
            unit: "box".to_string(),
        }
    }

    #[test]
    fn add_appends_product_in_order() {
        let mut catalog = Catalog::default();
        catalog.add(add_cmd("A1", "Aspirin")).unwrap();
        catalog.add(add_cmd("B2", "Ibuprofen")).unwrap();

        let skus: Vec<&str> = catalog.products().iter().map(|p| p.sku().as_str()).collect();
        assert_eq!(skus, vec!["A1", "B2"]);
        assert_eq!(catalog.get(&sku("A1")).unwrap().name(), "Aspirin");
    }

    #[test]
    fn duplicate_sku_is_rejected_and_catalog_unchanged() {
        let mut catalog = Catalog::default();
        catalog.add(add_cmd("A1", "Aspirin")).unwrap();

        let err = catalog.add(add_cmd("A1", "Other")).unwrap_err();
        match err {
            DomainError::Conflict(msg) if msg.contains("already exists") => {
                assert!(msg.contains("A1"));
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(&sku("A1")).unwrap().name(), "Aspirin");
    }

    #[test]
    fn free_text_fields_may_be_empty() {
        let mut catalog = Catalog::default();
        let product = catalog
            .add(AddProduct {
                sku: sku("X"),
                name: String::new(),
                category: String::new(),
                unit: String::new(),
            })
            .unwrap();
        assert_eq!(product.name(), "");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: however often a SKU is added, the catalog keeps exactly
        /// one record for it and every repeat is rejected.
        #[test]
        fn repeated_adds_keep_one_record_per_sku(
            raw in "[A-Z][A-Z0-9]{0,6}",
            repeats in 2usize..6,
        ) {
            let mut catalog = Catalog::default();
            prop_assert!(catalog.add(add_cmd(&raw, "first")).is_ok());

            for _ in 1..repeats {
                let rejected = matches!(catalog.add(add_cmd(&raw, "again")), Err(DomainError::Conflict(_)));
                prop_assert!(rejected);
            }

            let target = sku(&raw);
            let count = catalog.products().iter().filter(|p| p.sku() == &target).count();
            prop_assert_eq!(count, 1);
        }
    }
}
