// ==========================================
// AV BOQ 生成引擎 - 数据仓储层
// ==========================================
// 职责: 数据访问,不含业务逻辑
// 红线: Repository 不含业务规则
// ==========================================

pub mod boq_repo;
pub mod error;

pub use boq_repo::{room_key, BoqRecordSummary, BoqRepository};
pub use error::{RepositoryError, RepositoryResult};
