//! Stock derivation.
//!
//! Stock is never stored. It is the sum of inward quantities minus the sum of
//! outward quantities over the ledger, recomputed for every query.

use std::collections::HashMap;

use serde::Serialize;

use pharmastock_core::Sku;
use pharmastock_products::Product;

use crate::movement::Movement;

/// One row of the current-stock view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockRow {
    pub sku: Sku,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub stock: i64,
}

/// Narrow a ledger total to the reported range, saturating at the ends.
///
/// Totals are accumulated in `i128`, so no ledger can overflow mid-sum; only a
/// final total outside `i64` is clamped.
fn clamp_total(total: i128) -> i64 {
    i64::try_from(total).unwrap_or(if total < 0 { i64::MIN } else { i64::MAX })
}

/// Stock of a single SKU: O(movements).
pub fn compute_stock(sku: &Sku, movements: &[Movement]) -> i64 {
    let total: i128 = movements
        .iter()
        .filter(|m| m.sku() == sku)
        .map(|m| i128::from(m.signed_quantity()))
        .sum();
    clamp_total(total)
}

/// Stock of every SKU that appears in the ledger, in one pass.
pub fn stock_levels(movements: &[Movement]) -> HashMap<Sku, i64> {
    let mut totals: HashMap<&Sku, i128> = HashMap::new();
    for m in movements {
        *totals.entry(m.sku()).or_insert(0) += i128::from(m.signed_quantity());
    }
    totals
        .into_iter()
        .map(|(sku, total)| (sku.clone(), clamp_total(total)))
        .collect()
}

/// Current-stock table: one row per product, in catalog order.
///
/// Movements for SKUs missing from the catalog are ignored. Products with no
/// movements report zero.
pub fn stock_table(products: &[Product], movements: &[Movement]) -> Vec<StockRow> {
    let levels = stock_levels(movements);
    products
        .iter()
        .map(|p| StockRow {
            sku: p.sku().clone(),
            name: p.name().to_string(),
            category: p.category().to_string(),
            unit: p.unit().to_string(),
            stock: levels.get(p.sku()).copied().unwrap_or(0),
        })
        .collect()
}
