//! Integration tests for the full request pipeline against the CSV store.
//!
//! Tests: Request → InventoryService → Catalog/Ledger → CsvStore → files on disk
//!
//! Verifies:
//! - Rejections leave both collections untouched
//! - Stock is derived from the persisted ledger
//! - Initialization is idempotent across service restarts

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    use pharmastock_core::DomainError;
    use pharmastock_inventory::{compute_stock, MovementKind, Quantity};

    use crate::config::StoreConfig;
    use crate::services::{InventoryService, ServiceError};
    use crate::store::{CsvStore, InventoryStore};

    fn test_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn setup(dir: &TempDir) -> InventoryService<CsvStore> {
        InventoryService::new(CsvStore::new(StoreConfig::in_dir(dir.path())))
            .unwrap()
            .with_clock(test_time)
    }

    fn qty(units: i64) -> Quantity {
        Quantity::new(units).unwrap()
    }

    #[test]
    fn empty_store_initializes_with_headers_and_no_rows() {
        let dir = TempDir::new().unwrap();
        let svc = setup(&dir);

        assert!(svc.products().unwrap().is_empty());
        assert!(svc.movements(None).unwrap().is_empty());
        assert!(svc.stock_table().unwrap().is_empty());

        let config = svc.store().config();
        assert!(fs::read_to_string(&config.products_path).unwrap().starts_with("SKU,Name,Category,Unit"));
        assert!(
            fs::read_to_string(&config.movements_path)
                .unwrap()
                .starts_with("Timestamp,Kind,SKU,Quantity,Notes")
        );
    }

    #[test]
    fn duplicate_sku_is_rejected_and_catalog_keeps_one_row() {
        let dir = TempDir::new().unwrap();
        let svc = setup(&dir);

        let msg = svc.add_product("A1", "Aspirin", "Analgesic", "box").unwrap();
        assert!(msg.contains("A1"));

        let err = svc.add_product("A1", "Aspirin 500", "Analgesic", "box").unwrap_err();
        assert!(err.rejection_message().unwrap().contains("already exists"));

        let products = svc.store().load_products().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name(), "Aspirin");
    }

    #[test]
    fn inward_then_outward_leaves_seven_in_stock() {
        let dir = TempDir::new().unwrap();
        let svc = setup(&dir);
        svc.add_product("A1", "Aspirin", "Analgesic", "box").unwrap();

        svc.record_movement(MovementKind::Inward, "A1", qty(10), "").unwrap();
        svc.record_movement(MovementKind::Outward, "A1", qty(3), "").unwrap();

        let movements = svc.store().load_movements().unwrap();
        let a1 = pharmastock_core::Sku::parse("A1").unwrap();
        assert_eq!(compute_stock(&a1, &movements), 7);
        assert_eq!(svc.stock_for("A1").unwrap().stock, 7);

        let table = svc.stock_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].name, "Aspirin");
        assert_eq!(table[0].stock, 7);
    }

    #[test]
    fn movement_for_unknown_sku_leaves_ledger_unchanged() {
        let dir = TempDir::new().unwrap();
        let svc = setup(&dir);
        svc.add_product("A1", "Aspirin", "Analgesic", "box").unwrap();
        svc.record_movement(MovementKind::Inward, "A1", qty(1), "").unwrap();
        let before = fs::read_to_string(&svc.store().config().movements_path).unwrap();

        let err = svc
            .record_movement(MovementKind::Inward, "B9", qty(5), "")
            .unwrap_err();
        match &err {
            ServiceError::Rejected(DomainError::NotFound(msg)) => {
                assert!(msg.contains("B9"));
            }
            other => panic!("expected not found rejection, got {other:?}"),
        }

        let after = fs::read_to_string(&svc.store().config().movements_path).unwrap();
        assert_eq!(before, after);
        assert_eq!(svc.store().load_movements().unwrap().len(), 1);
    }

    #[test]
    fn restart_reinitializes_without_losing_data() {
        let dir = TempDir::new().unwrap();
        {
            let svc = setup(&dir);
            svc.add_product("A1", "Aspirin", "Analgesic", "box").unwrap();
            svc.record_movement(MovementKind::Inward, "A1", qty(4), "").unwrap();
        }

        for _ in 0..3 {
            let svc = setup(&dir);
            assert_eq!(svc.products().unwrap().len(), 1);
            assert_eq!(svc.stock_for("A1").unwrap().stock, 4);
        }
    }

    #[test]
    fn legacy_ledger_with_zero_and_negative_rows_stays_usable() {
        let dir = TempDir::new().unwrap();
        let svc = setup(&dir);
        svc.add_product("A1", "Aspirin", "Analgesic", "box").unwrap();

        fs::write(
            &svc.store().config().movements_path,
            "Fecha/Hora,Tipo,SKU,Cantidad,Observaciones\n\
             2024-01-02 10:00:00,Entrada,A1,10.0,\n\
             2024-01-02 11:00:00,Salida,A1,0,\n\
             2024-01-02 12:00:00,Salida,A1,-2,\n",
        )
        .unwrap();

        assert_eq!(svc.stock_for("A1").unwrap().stock, 12);
        svc.record_movement(MovementKind::Outward, "A1", qty(5), "").unwrap();
        assert_eq!(svc.stock_table().unwrap()[0].stock, 7);
        assert_eq!(svc.movements(Some("A1")).unwrap().len(), 4);

        // New entries are still held to the positive rule.
        let zero = Quantity::from_stored("0").unwrap();
        let err = svc.record_movement(MovementKind::Inward, "A1", zero, "").unwrap_err();
        assert!(matches!(err, ServiceError::Rejected(DomainError::Validation(_))));
        assert_eq!(svc.movements(None).unwrap().len(), 4);
    }

    #[test]
    fn corrupt_ledger_fails_the_request_without_writing() {
        let dir = TempDir::new().unwrap();
        let svc = setup(&dir);
        svc.add_product("A1", "Aspirin", "Analgesic", "box").unwrap();

        let path = svc.store().config().movements_path.clone();
        fs::write(&path, "garbage\n").unwrap();

        let err = svc
            .record_movement(MovementKind::Inward, "A1", qty(1), "")
            .unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "garbage\n");
    }
}
