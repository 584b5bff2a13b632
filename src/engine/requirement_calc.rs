// ==========================================
// AV BOQ 生成引擎 - 需求计算器
// ==========================================
// 职责: 房间几何/类型 → 工程目标值（纯函数）
// 显示: DISCAS 观看距离与画面高度
// 音频: 吸顶扬声器覆盖 + 麦克风拾音覆盖
// 供电/网络: 设备类估算 + 安全裕量/控制预留
// ==========================================

use crate::config::EngineConfig;
use crate::domain::room::RoomSpecification;
use crate::domain::targets::{EngineeringTargets, MicrophoneBasis};
use crate::domain::types::{CircuitRating, ViewingTask};
use crate::engine::error::{EngineError, EngineResult};
use std::sync::Arc;
use tracing::debug;

// ==========================================
// RequirementCalculator - 需求计算器
// ==========================================
pub struct RequirementCalculator {
    config: Arc<EngineConfig>,
}

impl RequirementCalculator {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// 计算工程目标值
    ///
    /// # 错误
    /// - InvalidGeometry: 尺寸 ≤ 0 / 非有限值 / 吊顶超出范围
    /// - InvalidCapacity: 容纳人数为 0
    /// - InvalidParameter: 元素高度比例或桌长覆写非法
    pub fn compute(&self, room: &RoomSpecification) -> EngineResult<EngineeringTargets> {
        self.validate(room)?;

        let profile = room.profile();
        let area = room.area_sqft();
        let room_tier = self.config.tiers.tier_for_area(area);

        // ===== 显示 =====
        let viewing_task = room.effective_viewing_task();
        let max_viewing_distance_ft =
            room.length_ft.max(room.width_ft) * self.config.display.viewing_distance_factor;
        let element_pct = room
            .element_height_pct
            .unwrap_or(self.config.display.default_element_height_pct);
        let image_height_ft = self.image_height_ft(viewing_task, max_viewing_distance_ft, element_pct);
        let computed_diagonal_in = image_height_ft * 12.0 * self.config.display.diagonal_factor;
        let (recommended_display_in, exceeds_standard_sizes) = self.snap_diagonal(computed_diagonal_in);

        let display_count = if room.preferences.features.dual_display {
            profile.display_count.max(2)
        } else {
            profile.display_count
        };

        // ===== 音频 =====
        let (speaker_count, speaker_coverage_sqft) =
            self.speaker_count(area, room.ceiling_height_ft, profile.speech_critical);
        let (microphone_count, microphone_basis) = self.microphone_count(room, area);

        // ===== 供电 =====
        let power_draw_watts = self.power_draw_watts(
            display_count,
            recommended_display_in,
            microphone_count,
        );
        let power_amps = power_draw_watts / self.config.power.voltage;
        let circuit_rating = self.circuit_rating(power_amps);
        let ups_va = power_draw_watts * self.config.power.ups_va_factor;

        // ===== 网络 =====
        let network_bandwidth_mbps =
            self.network_bandwidth_mbps(room.capacity, microphone_count, display_count);

        debug!(
            room_type = %room.room_type,
            area_sqft = area,
            tier = %room_tier,
            diagonal = computed_diagonal_in,
            display_in = recommended_display_in,
            speakers = speaker_count,
            mics = microphone_count,
            watts = power_draw_watts,
            mbps = network_bandwidth_mbps,
            "工程目标值计算完成"
        );

        Ok(EngineeringTargets {
            room_area_sqft: area,
            room_tier,
            viewing_task,
            max_viewing_distance_ft,
            image_height_ft,
            computed_diagonal_in,
            recommended_display_in,
            exceeds_standard_sizes,
            display_count,
            speaker_count,
            speaker_coverage_sqft,
            microphone_count,
            microphone_basis,
            power_draw_watts,
            power_amps,
            circuit_rating,
            ups_va,
            network_bandwidth_mbps,
        })
    }

    fn validate(&self, room: &RoomSpecification) -> EngineResult<()> {
        let dims = [
            ("length_ft", room.length_ft),
            ("width_ft", room.width_ft),
            ("ceiling_height_ft", room.ceiling_height_ft),
        ];
        for (field, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::InvalidGeometry(format!(
                    "{} 必须为正的有限值,实际 {}",
                    field, value
                )));
            }
        }

        let geometry = &self.config.geometry;
        if room.ceiling_height_ft < geometry.min_ceiling_ft
            || room.ceiling_height_ft > geometry.max_ceiling_ft
        {
            return Err(EngineError::InvalidGeometry(format!(
                "吊顶高度 {}ft 超出范围 [{}, {}]",
                room.ceiling_height_ft, geometry.min_ceiling_ft, geometry.max_ceiling_ft
            )));
        }

        if room.capacity == 0 {
            return Err(EngineError::InvalidCapacity("容纳人数必须大于 0".to_string()));
        }

        if let Some(pct) = room.element_height_pct {
            if !pct.is_finite() || pct <= 0.0 || pct > 1.0 {
                return Err(EngineError::InvalidParameter {
                    field: "element_height_pct".to_string(),
                    message: format!("必须在 (0, 1] 内,实际 {}", pct),
                });
            }
        }
        if let Some(table) = room.table_length_ft {
            if !table.is_finite() || table <= 0.0 {
                return Err(EngineError::InvalidParameter {
                    field: "table_length_ft".to_string(),
                    message: format!("必须为正的有限值,实际 {}", table),
                });
            }
        }

        Ok(())
    }

    /// 画面高度 (ft)
    pub fn image_height_ft(&self, task: ViewingTask, distance_ft: f64, element_pct: f64) -> f64 {
        let d = &self.config.display;
        match task {
            ViewingTask::Analytical => distance_ft * d.analytical_vertical_pixels / d.analytical_divisor,
            ViewingTask::Basic => (distance_ft / d.basic_divisor) / element_pct,
            ViewingTask::Passive => distance_ft / d.passive_divisor,
        }
    }

    /// 向上取整到标准尺寸; 超出最大尺寸时封顶并标记
    pub fn snap_diagonal(&self, diagonal_in: f64) -> (u32, bool) {
        let sizes = &self.config.display.standard_sizes_in;
        match sizes.iter().find(|s| f64::from(**s) >= diagonal_in) {
            Some(size) => (*size, false),
            None => (sizes.last().copied().unwrap_or(0), true),
        }
    }

    /// 扬声器数量与单只覆盖面积
    pub fn speaker_count(&self, area_sqft: f64, ceiling_ft: f64, speech_critical: bool) -> (u32, f64) {
        let a = &self.config.audio;
        let base = if ceiling_ft <= a.low_ceiling_max_ft {
            a.coverage_low_sqft
        } else if ceiling_ft <= a.mid_ceiling_max_ft {
            a.coverage_mid_sqft
        } else {
            a.coverage_high_sqft
        };
        let coverage = if speech_critical {
            base * a.speech_critical_factor
        } else {
            base
        };

        let count = (area_sqft / coverage).ceil() as u32;
        (count.max(a.min_speakers), coverage)
    }

    fn microphone_count(&self, room: &RoomSpecification, area_sqft: f64) -> (u32, MicrophoneBasis) {
        let a = &self.config.audio;
        let (raw, basis) = if room.effective_seating_layout().is_table_based() {
            (
                (room.effective_table_length_ft() / a.mic_table_spacing_ft).ceil(),
                MicrophoneBasis::TableLength,
            )
        } else {
            (
                (area_sqft / a.mic_area_coverage_sqft).ceil(),
                MicrophoneBasis::FloorArea,
            )
        };
        ((raw as u32).max(a.min_microphones), basis)
    }

    fn power_draw_watts(&self, displays: u32, display_in: u32, microphones: u32) -> f64 {
        let p = &self.config.power;
        let base = f64::from(displays) * f64::from(display_in) * p.display_watts_per_inch
            + p.video_system_watts
            + p.camera_watts
            + p.dsp_watts
            + p.amplifier_watts
            + f64::from(microphones) * p.microphone_watts
            + p.control_watts
            + p.network_switch_watts
            + p.signal_watts;
        base * p.safety_margin
    }

    /// 回路等级阶梯
    pub fn circuit_rating(&self, amps: f64) -> CircuitRating {
        let p = &self.config.power;
        if amps < p.circuit_15a_max_amps {
            CircuitRating::Circuit15A
        } else if amps < p.circuit_20a_max_amps {
            CircuitRating::Circuit20A
        } else {
            CircuitRating::Multiple20A
        }
    }

    fn network_bandwidth_mbps(&self, capacity: u32, microphones: u32, displays: u32) -> f64 {
        let n = &self.config.network;
        let occupants = capacity.min(n.occupant_cap);
        n.vc_stream_mbps
            + n.content_stream_mbps
            + f64::from(microphones) * n.per_microphone_mbps
            + f64::from(displays) * n.per_display_mbps
            + f64::from(occupants) * n.per_occupant_mbps
            + n.control_reservation_mbps
    }
}
