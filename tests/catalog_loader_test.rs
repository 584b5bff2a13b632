// ==========================================
// 目录导入集成测试
// ==========================================
// 测试目标: CSV 文件 → 映射 → 清洗 → DQ → 能力推导 → Catalog 快照
// ==========================================

mod helpers;

use av_boq_engine::domain::types::{DataQuality, ProductCategory};
use av_boq_engine::importer::{CatalogLoader, ImportError};
use helpers::{write_catalog_csv, CATALOG_CSV};

#[test]
fn test_sample_catalog_loads_with_capabilities() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_catalog_csv(dir.path(), CATALOG_CSV);

    let (catalog, report) = CatalogLoader::default().load_file(&path).unwrap();
    assert_eq!(report.total_rows, catalog.len());
    assert_eq!(report.loaded, catalog.len());
    assert_eq!(report.uncategorized, 0);
    assert_eq!(report.catalog_version, catalog.version());
    assert!(catalog.version().starts_with("catalog-"));

    let rally = catalog
        .products()
        .iter()
        .find(|p| p.name == "Logitech Rally Bar")
        .unwrap();
    assert_eq!(rally.category, ProductCategory::VideoConferencing);
    assert_eq!(rally.price, 3999.0);
    assert!(rally.capabilities.integrated_microphones);
    assert!(rally.capabilities.integrated_speakers);

    let warranty = catalog
        .products()
        .iter()
        .find(|p| p.name.contains("Warranty"))
        .unwrap();
    assert!(warranty.capabilities.is_service);

    let amp = catalog
        .products()
        .iter()
        .find(|p| p.name == "Crown DCi 8|600N")
        .unwrap();
    assert_eq!(amp.power_watts, Some(4800.0));

    let display = catalog.in_category(ProductCategory::Displays).next().unwrap();
    assert_eq!(display.size_inches, Some(55.0));
}

#[test]
fn test_defective_rows_degrade_or_skip() {
    let csv = "\
\u{feff}Name,Manufacturer,SKU,Category,Type,MSRP,Details
Samsung QM85C,Samsung,LH85QMC,Displays,Professional Display,\"$4,200.00\",4K display
,Samsung,LH75QMC,Displays,Professional Display,$2600,missing name
Mystery Box,Acme,MB-1,Gadgets,,N/A,
Chief LTM1U,Chief,LTM1U,,Display Mount,$350,missing category
";
    let dir = tempfile::tempdir().unwrap();
    let path = write_catalog_csv(dir.path(), csv);

    let (catalog, report) = CatalogLoader::default().load_file(&path).unwrap();
    assert_eq!(report.total_rows, 4);
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].row_number, 3);
    assert_eq!(report.skipped[1].row_number, 5);
    assert_eq!(report.uncategorized, 1);

    let display = &catalog.products()[0];
    assert_eq!(display.price, 4200.0);

    let mystery = &catalog.products()[1];
    assert_eq!(mystery.category, ProductCategory::Other);
    assert_eq!(mystery.price, 0.0);
    assert_eq!(mystery.data_quality, DataQuality::Poor);
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CatalogLoader::default()
        .load_file(&dir.path().join("absent.csv"))
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}
