// ==========================================
// AV BOQ 生成引擎 - 引擎层
// ==========================================
// 流程: 需求计算 → 蓝图 → 候选解析 → 跨条目协调 → 质量评分 → 装配
// 职责: 实现选型规则,不做 IO
// 红线: 引擎不读写数据库/文件,目录与配置由调用方注入
// ==========================================

pub mod assembler;
pub mod blueprint;
pub mod error;
pub mod generator;
pub mod project;
pub mod quality;
pub mod reconciler;
pub mod requirement_calc;
pub mod resolver;

// 重导出核心组件
pub use assembler::Assembler;
pub use blueprint::{BlueprintBuilder, QuantityRule, RequirementTemplate, SizeRule, TIER_TABLE};
pub use error::{EngineError, EngineResult};
pub use generator::{BoqGenerator, GenerationRequest, ENGINE_VERSION};
pub use project::ProjectConsolidator;
pub use quality::{QualityScorer, ScoringInput};
pub use reconciler::CrossItemReconciler;
pub use requirement_calc::RequirementCalculator;
pub use resolver::{CandidateResolver, ScoreBreakdown, ScoredCandidate};
