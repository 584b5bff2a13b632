// ==========================================
// AV BOQ 生成引擎 - 候选解析器
// ==========================================
// 职责: 抽象需求 → 具体目录产品（或 NoCandidate）
// 流程: 类目 → 非服务 → 关键词 → 规格 → 价格 → 加权评分
// 红线: 过滤阶段严格有序,每阶段只缩小候选集
// 红线: 同输入同输出（平局按最低价、目录顺序裁决）
// ==========================================

mod core;
mod filters;
mod scoring;
mod validators;

#[cfg(test)]
mod tests;

pub use core::{CandidateResolver, ScoredCandidate};
pub use scoring::ScoreBreakdown;
pub use validators::{validator_for, CategoryValidator, CATEGORY_VALIDATORS};
