// ==========================================
// AV BOQ 生成引擎 - 导入层
// ==========================================
// 职责: 外部产品目录导入,生成不可变目录快照
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod capability;
pub mod catalog_importer_trait;
pub mod catalog_loader;
pub mod data_cleaner;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use capability::{derive_capabilities, CapabilityInput};
pub use catalog_loader::CatalogLoader;
pub use data_cleaner::CatalogDataCleaner;
pub use dq_validator::CatalogDqGrader;
pub use error::{ImportError, ImportResult};
pub use field_mapper::CatalogFieldMapper;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use catalog_importer_trait::{DataCleaner, DqGrader, DqInput, FieldMapper, FileParser};
