// ==========================================
// AV BOQ 生成引擎 - 项目级汇总
// ==========================================
// 职责: 多房间共享基础设施的合并建议（网络 / 功放 / 机柜）
// 红线: 只作为建议输出,不回写各房间 BOQ
// ==========================================

use serde::{Deserialize, Serialize};

/// 集中式 PoE 交换机建议
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConsolidation {
    /// 如 "48-port Managed PoE+"
    pub switch_type: String,
    pub switch_count: u32,
    /// 含扩容余量的总端口数
    pub ports: u32,
    /// 各房间已选交换机所在房间数
    pub replaces_room_switches: usize,
    /// 被替代的房间级交换机金额
    pub displaced_cost: f64,
}

/// 集中式多分区功放建议（仅适用于相邻房间）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplifierConsolidation {
    pub channels: u32,
    pub replaces_room_amplifiers: usize,
    pub displaced_cost: f64,
}

/// 共享机房机柜建议
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackConsolidation {
    pub replaces_room_racks: usize,
    pub displaced_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: String,
    pub room_labels: Vec<String>,
    /// 各房间硬件合计之和（未扣除合并建议）
    pub hardware_total: f64,
    pub network: Option<NetworkConsolidation>,
    pub amplifiers: Option<AmplifierConsolidation>,
    pub racks: Option<RackConsolidation>,
    pub notes: Vec<String>,
}

impl ProjectSummary {
    /// 所有合并建议替代的房间级设备金额
    pub fn displaced_total(&self) -> f64 {
        self.network.as_ref().map_or(0.0, |n| n.displaced_cost)
            + self.amplifiers.as_ref().map_or(0.0, |a| a.displaced_cost)
            + self.racks.as_ref().map_or(0.0, |r| r.displaced_cost)
    }

    pub fn has_suggestions(&self) -> bool {
        self.network.is_some() || self.amplifiers.is_some() || self.racks.is_some()
    }
}
