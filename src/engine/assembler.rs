// ==========================================
// AV BOQ 生成引擎 - 装配器
// ==========================================
// 职责: 将各阶段产物打包为 BillOfQuantities
// 红线: 只打包,不计算
// ==========================================

use crate::domain::boq::{BillOfQuantities, BoqMetadata, QualityReport, ReconciliationOutcome, UnresolvedRequirement};
use crate::domain::room::RoomSpecification;
use crate::domain::targets::EngineeringTargets;

pub struct Assembler;

impl Assembler {
    pub fn assemble(
        metadata: BoqMetadata,
        room: RoomSpecification,
        targets: EngineeringTargets,
        outcome: ReconciliationOutcome,
        unresolved: Vec<UnresolvedRequirement>,
        report: QualityReport,
    ) -> BillOfQuantities {
        let ReconciliationOutcome { items, flags, removed } = outcome;
        BillOfQuantities {
            metadata,
            room,
            targets,
            items,
            unresolved,
            removed,
            flags,
            report,
        }
    }
}
