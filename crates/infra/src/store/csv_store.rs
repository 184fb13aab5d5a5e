use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use pharmastock_core::Sku;
use pharmastock_inventory::{Movement, MovementKind, Quantity, TIMESTAMP_FORMAT};
use pharmastock_products::Product;

use super::{Collection, InventoryStore, StoreError};
use crate::config::StoreConfig;

/// Header written for the product collection.
pub const PRODUCT_HEADER: [&str; 4] = ["SKU", "Name", "Category", "Unit"];

/// Header written for the movement collection.
pub const MOVEMENT_HEADER: [&str; 5] = ["Timestamp", "Kind", "SKU", "Quantity", "Notes"];

// Files written by the original spreadsheet tool; same columns, same order.
const LEGACY_PRODUCT_HEADER: [&str; 4] = ["SKU", "Nombre", "Categoría", "Unidad"];
const LEGACY_MOVEMENT_HEADER: [&str; 5] = ["Fecha/Hora", "Tipo", "SKU", "Cantidad", "Observaciones"];

/// CSV-backed store: one file per collection, header row required.
///
/// Columns are read by position; either the canonical header or the legacy
/// Spanish header is accepted on read, and the canonical header is always
/// written. Saves go through a sibling `.tmp` file that is renamed over the
/// target, so a failed save leaves the previous collection intact.
#[derive(Debug, Clone)]
pub struct CsvStore {
    config: StoreConfig,
}

impl CsvStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn path(&self, collection: Collection) -> &Path {
        match collection {
            Collection::Products => &self.config.products_path,
            Collection::Movements => &self.config.movements_path,
        }
    }

    fn create_if_missing(&self, collection: Collection, header: &[&str]) -> Result<(), StoreError> {
        let path = self.path(collection);
        if path.exists() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::write(collection, e))?;
            }
        }

        write_records(path, collection, header, std::iter::empty::<Vec<String>>())?;
        tracing::info!(collection = %collection, path = %path.display(), "created empty collection");
        Ok(())
    }

    fn read_records(
        &self,
        collection: Collection,
        accepted_headers: &[&[&str]],
    ) -> Result<Vec<csv::StringRecord>, StoreError> {
        let path = self.path(collection);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| StoreError::read(collection, format!("{}: {e}", path.display())))?;

        let headers = reader
            .headers()
            .map_err(|e| StoreError::read(collection, e))?
            .clone();
        let known = accepted_headers
            .iter()
            .any(|expected| headers.iter().eq(expected.iter().copied()));
        if !known {
            return Err(StoreError::read(
                collection,
                format!("unexpected header {:?}", headers.iter().collect::<Vec<_>>()),
            ));
        }

        reader
            .records()
            .map(|r| r.map_err(|e| StoreError::read(collection, e)))
            .collect()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_records<R, F>(
    path: &Path,
    collection: Collection,
    header: &[&str],
    rows: R,
) -> Result<(), StoreError>
where
    R: IntoIterator<Item = F>,
    F: IntoIterator,
    F::Item: AsRef<[u8]>,
{
    let tmp = tmp_path(path);
    {
        let mut writer = csv::Writer::from_path(&tmp).map_err(|e| StoreError::write(collection, e))?;
        writer
            .write_record(header)
            .map_err(|e| StoreError::write(collection, e))?;
        for row in rows {
            writer
                .write_record(row)
                .map_err(|e| StoreError::write(collection, e))?;
        }
        writer.flush().map_err(|e| StoreError::write(collection, e))?;
    }
    fs::rename(&tmp, path).map_err(|e| StoreError::write(collection, e))
}

// Data rows start on line 2 (line 1 is the header).
fn field<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    collection: Collection,
    row: usize,
) -> Result<&'r str, StoreError> {
    record
        .get(idx)
        .ok_or_else(|| StoreError::read(collection, format!("line {}: missing column {idx}", row + 2)))
}

fn parse_product(record: &csv::StringRecord, row: usize) -> Result<Product, StoreError> {
    let c = Collection::Products;
    let sku = Sku::parse(field(record, 0, c, row)?)
        .map_err(|e| StoreError::read(c, format!("line {}: {}", row + 2, e.reason())))?;
    Ok(Product::new(
        sku,
        field(record, 1, c, row)?,
        field(record, 2, c, row)?,
        field(record, 3, c, row)?,
    ))
}

fn parse_movement(record: &csv::StringRecord, row: usize) -> Result<Movement, StoreError> {
    let c = Collection::Movements;
    let line = row + 2;

    let raw_ts = field(record, 0, c, row)?;
    let timestamp = NaiveDateTime::parse_from_str(raw_ts.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| StoreError::read(c, format!("line {line}: bad timestamp {raw_ts:?}: {e}")))?;
    let kind: MovementKind = field(record, 1, c, row)?
        .parse()
        .map_err(|e: pharmastock_core::DomainError| StoreError::read(c, format!("line {line}: {}", e.reason())))?;
    let sku = Sku::parse(field(record, 2, c, row)?)
        .map_err(|e| StoreError::read(c, format!("line {line}: {}", e.reason())))?;
    let quantity = Quantity::from_stored(field(record, 3, c, row)?)
        .map_err(|e| StoreError::read(c, format!("line {line}: {}", e.reason())))?;

    Ok(Movement::new(timestamp, kind, sku, quantity, field(record, 4, c, row)?))
}

impl InventoryStore for CsvStore {
    fn initialize(&self) -> Result<(), StoreError> {
        self.create_if_missing(Collection::Products, &PRODUCT_HEADER)?;
        self.create_if_missing(Collection::Movements, &MOVEMENT_HEADER)?;
        Ok(())
    }

    fn load_products(&self) -> Result<Vec<Product>, StoreError> {
        self.read_records(Collection::Products, &[&PRODUCT_HEADER, &LEGACY_PRODUCT_HEADER])?
            .iter()
            .enumerate()
            .map(|(row, record)| parse_product(record, row))
            .collect()
    }

    fn load_movements(&self) -> Result<Vec<Movement>, StoreError> {
        self.read_records(Collection::Movements, &[&MOVEMENT_HEADER, &LEGACY_MOVEMENT_HEADER])?
            .iter()
            .enumerate()
            .map(|(row, record)| parse_movement(record, row))
            .collect()
    }

    fn save_products(&self, products: &[Product]) -> Result<(), StoreError> {
        let rows = products.iter().map(|p| {
            [
                p.sku().as_str().to_string(),
                p.name().to_string(),
                p.category().to_string(),
                p.unit().to_string(),
            ]
        });
        write_records(self.path(Collection::Products), Collection::Products, &PRODUCT_HEADER, rows)
    }

    fn save_movements(&self, movements: &[Movement]) -> Result<(), StoreError> {
        let rows = movements.iter().map(|m| {
            [
                m.timestamp().format(TIMESTAMP_FORMAT).to_string(),
                m.kind().as_str().to_string(),
                m.sku().as_str().to_string(),
                m.quantity().to_string(),
                m.notes().to_string(),
            ]
        });
        write_records(
            self.path(Collection::Movements),
            Collection::Movements,
            &MOVEMENT_HEADER,
            rows,
        )
    }
}
