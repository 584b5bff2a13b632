// ==========================================
// AV BOQ 生成引擎 - 工程量清单
// ==========================================
// 职责: SelectedItem / UnresolvedRequirement / 协调记录 / 质量报告 / BOQ
// 红线: QualityReport 只对 items_fingerprint 对应的条目集合有效
// ==========================================

use crate::domain::catalog::CatalogProduct;
use crate::domain::requirement::AbstractRequirement;
use crate::domain::room::RoomSpecification;
use crate::domain::targets::EngineeringTargets;
use crate::domain::types::{FilterStage, FlagKind, Grade, ReasonCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// SelectedItem - 已选条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedItem {
    /// 产品快照（独立于目录生命周期）
    pub product: CatalogProduct,
    pub requirement: AbstractRequirement,
    pub quantity: u32,
    /// 选型置信度 0~1
    pub confidence: f64,
}

impl SelectedItem {
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// 无候选的需求（值,不是错误）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedRequirement {
    pub requirement: AbstractRequirement,
    pub reason: ReasonCode,
    /// 最后一个候选被淘汰的阶段
    pub eliminated_at: FilterStage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationFlag {
    pub kind: FlagKind,
    pub message: String,
    /// 涉及条目的需求键
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovedItem {
    pub item: SelectedItem,
    pub reason: String,
}

/// 协调器输出
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    pub items: Vec<SelectedItem>,
    pub flags: Vec<ReconciliationFlag>,
    pub removed: Vec<RemovedItem>,
}

// ==========================================
// QualityReport - 质量报告
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub compliance: f64,
    pub completeness: f64,
    pub price_sanity: f64,
    pub brand_consistency: f64,
    pub confidence: f64,
    pub integration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub sub_scores: SubScores,
    pub total: f64,
    pub grade: Grade,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub items_fingerprint: String,
}

/// 条目集合指纹: 型号 x 数量,按出现顺序拼接
pub fn items_fingerprint(items: &[SelectedItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}:{}x{}", i.requirement.key, i.product.model_number, i.quantity))
        .collect::<Vec<_>>()
        .join("|")
}

// ==========================================
// BillOfQuantities - 工程量清单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoqMetadata {
    pub project_id: String,
    pub room_label: String,
    pub catalog_version: String,
    pub engine_version: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillOfQuantities {
    pub metadata: BoqMetadata,
    pub room: RoomSpecification,
    pub targets: EngineeringTargets,
    pub items: Vec<SelectedItem>,
    pub unresolved: Vec<UnresolvedRequirement>,
    pub removed: Vec<RemovedItem>,
    pub flags: Vec<ReconciliationFlag>,
    pub report: QualityReport,
}

impl BillOfQuantities {
    /// 条目集合变更后报告即失效
    pub fn is_report_current(&self) -> bool {
        self.report.items_fingerprint == items_fingerprint(&self.items)
    }

    pub fn hardware_total(&self) -> f64 {
        self.items.iter().map(SelectedItem::line_total).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
