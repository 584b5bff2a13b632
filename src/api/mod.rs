// ==========================================
// AV BOQ 生成引擎 - API 层
// ==========================================
// 职责: 面向 CLI / 宿主程序的业务入口
// ==========================================

pub mod boq_api;

pub use boq_api::{BoqApi, DEFAULT_JUSTIFICATION_TIMEOUT};
