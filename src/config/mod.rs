// ==========================================
// AV BOQ 生成引擎 - 配置层
// ==========================================
// 职责: 引擎常量表 + 多级覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod engine_config;
pub mod error;

pub use config_manager::{config_keys, ConfigManager};
pub use engine_config::{
    AudioConfig, ComplianceThresholds, DisplayConfig, EngineConfig, GeometryConfig, NetworkConfig,
    PowerConfig, PriceBand, ProjectConfig, QualityConfig, QualityWeights, ReconcilerConfig, ResolverConfig,
    ResolverWeights, TierThresholds,
};
pub use error::{ConfigError, ConfigResult};
