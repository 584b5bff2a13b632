// ==========================================
// AV BOQ 生成引擎 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 房间规格 + 产品目录 → 可解释、可复现的 AV 工程量清单
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 引擎常量表
pub mod config;

// 导入层 - 产品目录
pub mod importer;

// 引擎层 - 生成流水线
pub mod engine;

// 协作服务 - 理由生成 / 导出
pub mod services;

// 数据仓储层 - BOQ 持久化
pub mod repository;

// API 层 - 业务接口
pub mod api;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    BudgetTier, FilterStage, Grade, ProductCategory, RoomTier, RoomType, ViewingTask,
};

// 领域实体
pub use domain::{
    AbstractRequirement, BillOfQuantities, Catalog, CatalogHandle, CatalogProduct,
    EngineeringTargets, Preferences, QualityReport, RoomSpecification, SelectedItem,
    UnresolvedRequirement,
};

// 配置
pub use config::{ConfigManager, EngineConfig};

// 引擎
pub use engine::{
    BlueprintBuilder, BoqGenerator, CandidateResolver, CrossItemReconciler, EngineError,
    GenerationRequest, QualityScorer, RequirementCalculator,
};

// 导入
pub use importer::CatalogLoader;

// API
pub use api::BoqApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "AV BOQ 生成引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(VERSION, engine::ENGINE_VERSION);
    }
}
