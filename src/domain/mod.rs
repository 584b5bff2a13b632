// ==========================================
// AV BOQ 生成引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、封闭枚举、少量值对象辅助方法
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod boq;
pub mod catalog;
pub mod project;
pub mod requirement;
pub mod room;
pub mod targets;
pub mod types;

// 重导出核心类型
pub use boq::{
    items_fingerprint, BillOfQuantities, BoqMetadata, QualityReport, ReconciliationFlag,
    ReconciliationOutcome, RemovedItem, SelectedItem, SubScores, UnresolvedRequirement,
};
pub use catalog::{
    Capabilities, Catalog, CatalogHandle, CatalogLoadReport, CatalogProduct, RawProductRecord,
    SkippedRow,
};
pub use project::{
    AmplifierConsolidation, NetworkConsolidation, ProjectSummary, RackConsolidation,
};
pub use requirement::{AbstractRequirement, KeywordRules, NumericRange};
pub use room::{ComplianceFlags, FeatureFlags, Preferences, RoomProfile, RoomSpecification};
pub use targets::{EngineeringTargets, MicrophoneBasis};
pub use types::{
    BudgetTier, CircuitRating, DataQuality, Ecosystem, FilterStage, FlagKind, Grade,
    ProductCategory, ReasonCode, RequirementPurpose, RoomTier, RoomType, SeatingLayout,
    ViewingTask,
};
