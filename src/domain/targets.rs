// ==========================================
// AV BOQ 生成引擎 - 工程目标值
// ==========================================
// 红线: 每个 RoomSpecification 重新计算,禁止跨房间缓存
// ==========================================

use crate::domain::types::{CircuitRating, RoomTier, ViewingTask};
use serde::{Deserialize, Serialize};

/// 麦克风数量的计算口径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MicrophoneBasis {
    TableLength,
    FloorArea,
}

/// 由房间几何推导出的工程目标值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeringTargets {
    pub room_area_sqft: f64,
    pub room_tier: RoomTier,

    // ===== 显示 (DISCAS) =====
    pub viewing_task: ViewingTask,
    pub max_viewing_distance_ft: f64,
    pub image_height_ft: f64,
    /// 公式计算的对角线（未取整）
    pub computed_diagonal_in: f64,
    /// 向上取整到标准尺寸后的推荐对角线
    pub recommended_display_in: u32,
    /// 计算值超过最大标准尺寸（需拼接屏/LED/投影）
    pub exceeds_standard_sizes: bool,
    pub display_count: u32,

    // ===== 音频 =====
    pub speaker_count: u32,
    pub speaker_coverage_sqft: f64,
    pub microphone_count: u32,
    pub microphone_basis: MicrophoneBasis,

    // ===== 供电 =====
    pub power_draw_watts: f64,
    pub power_amps: f64,
    pub circuit_rating: CircuitRating,
    pub ups_va: f64,

    // ===== 网络 =====
    pub network_bandwidth_mbps: f64,
}
