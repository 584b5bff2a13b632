// ==========================================
// AV BOQ 生成引擎 - 下游协作服务
// ==========================================
// 职责: 消费已完成 BOQ 的协作方（理由生成 / 文档导出）
// 红线: 协作方失败不改变 BOQ
// ==========================================

pub mod export;
pub mod justification;

pub use export::{BoqExporter, CsvBoqExporter, ExportError, ExportResult};
pub use justification::{
    JustificationDispatcher, JustificationError, JustificationService, JustificationSet,
    TemplateJustifier,
};
