// ==========================================
// AV BOQ 生成引擎 - 引擎常量表
// ==========================================
// 职责: 唯一权威常量表（尺寸阶梯/覆盖面积/安全系数/评分权重等）
// 来源优先级: 内置默认 < JSON 文件 < config_kv('engine_config')
// 红线: 生成前解析一次,以 Arc<EngineConfig> 共享,生成期间不可变
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::{BudgetTier, ProductCategory, RoomTier};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

// 浮点权重求和容差
const WEIGHT_EPSILON: f64 = 1e-6;

// ==========================================
// EngineConfig - 顶层配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub geometry: GeometryConfig,
    pub display: DisplayConfig,
    pub audio: AudioConfig,
    pub power: PowerConfig,
    pub network: NetworkConfig,
    pub tiers: TierThresholds,
    pub compliance: ComplianceThresholds,
    pub resolver: ResolverConfig,
    pub reconciler: ReconcilerConfig,
    pub quality: QualityConfig,
    pub project: ProjectConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            display: DisplayConfig::default(),
            audio: AudioConfig::default(),
            power: PowerConfig::default(),
            network: NetworkConfig::default(),
            tiers: TierThresholds::default(),
            compliance: ComplianceThresholds::default(),
            resolver: ResolverConfig::default(),
            reconciler: ReconcilerConfig::default(),
            quality: QualityConfig::default(),
            project: ProjectConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub min_ceiling_ft: f64,
    pub max_ceiling_ft: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            min_ceiling_ft: 6.0,
            max_ceiling_ft: 60.0,
        }
    }
}

// ==========================================
// 显示尺寸 (DISCAS)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// 最远观看距离 = 长边 x 系数
    pub viewing_distance_factor: f64,
    /// ADM: 画面垂直像素
    pub analytical_vertical_pixels: f64,
    /// ADM: 1 弧分/像素对应的距离除数
    pub analytical_divisor: f64,
    /// BDM: 距离除数
    pub basic_divisor: f64,
    pub default_element_height_pct: f64,
    /// PDM: 距离除数
    pub passive_divisor: f64,
    /// 画面高度 (in) → 16:9 对角线
    pub diagonal_factor: f64,
    /// 标准尺寸阶梯（升序）
    pub standard_sizes_in: Vec<u32>,
    /// 尺寸需求允许的上浮 (in)
    pub size_headroom_in: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            viewing_distance_factor: 0.85,
            analytical_vertical_pixels: 1080.0,
            analytical_divisor: 3438.0,
            basic_divisor: 200.0,
            default_element_height_pct: 0.04,
            passive_divisor: 8.0,
            diagonal_factor: 2.22,
            standard_sizes_in: vec![43, 55, 65, 75, 85, 98],
            size_headroom_in: 13.0,
        }
    }
}

// ==========================================
// 音频
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub low_ceiling_max_ft: f64,
    pub mid_ceiling_max_ft: f64,
    /// 单只吸顶扬声器覆盖面积 (sq ft): 低/中/高吊顶
    pub coverage_low_sqft: f64,
    pub coverage_mid_sqft: f64,
    pub coverage_high_sqft: f64,
    /// 语音优先房间的覆盖缩减系数
    pub speech_critical_factor: f64,
    pub min_speakers: u32,
    /// 会议桌每支麦克风覆盖的桌长 (ft)
    pub mic_table_spacing_ft: f64,
    /// 非会议桌布局每支麦克风覆盖面积 (sq ft)
    pub mic_area_coverage_sqft: f64,
    pub min_microphones: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            low_ceiling_max_ft: 9.0,
            mid_ceiling_max_ft: 12.0,
            coverage_low_sqft: 150.0,
            coverage_mid_sqft: 200.0,
            coverage_high_sqft: 250.0,
            speech_critical_factor: 0.8,
            min_speakers: 2,
            mic_table_spacing_ft: 6.0,
            mic_area_coverage_sqft: 200.0,
            min_microphones: 2,
        }
    }
}

// ==========================================
// 供电
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    pub voltage: f64,
    pub safety_margin: f64,
    /// 低于该电流 → 15A 回路
    pub circuit_15a_max_amps: f64,
    /// 低于该电流 → 20A 回路,否则多路 20A
    pub circuit_20a_max_amps: f64,
    pub ups_va_factor: f64,
    /// 设备类功耗估算 (W)
    pub display_watts_per_inch: f64,
    pub video_system_watts: f64,
    pub camera_watts: f64,
    pub dsp_watts: f64,
    pub amplifier_watts: f64,
    pub microphone_watts: f64,
    pub control_watts: f64,
    pub network_switch_watts: f64,
    pub signal_watts: f64,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            voltage: 120.0,
            safety_margin: 1.2,
            circuit_15a_max_amps: 10.0,
            circuit_20a_max_amps: 15.0,
            ups_va_factor: 1.4,
            display_watts_per_inch: 3.5,
            video_system_watts: 60.0,
            camera_watts: 15.0,
            dsp_watts: 40.0,
            amplifier_watts: 150.0,
            microphone_watts: 5.0,
            control_watts: 25.0,
            network_switch_watts: 60.0,
            signal_watts: 30.0,
        }
    }
}

// ==========================================
// 网络
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub vc_stream_mbps: f64,
    pub content_stream_mbps: f64,
    pub per_microphone_mbps: f64,
    pub per_display_mbps: f64,
    pub per_occupant_mbps: f64,
    pub occupant_cap: u32,
    /// 控制流量预留
    pub control_reservation_mbps: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            vc_stream_mbps: 5.0,
            content_stream_mbps: 4.0,
            per_microphone_mbps: 1.0,
            per_display_mbps: 1.0,
            per_occupant_mbps: 2.5,
            occupant_cap: 50,
            control_reservation_mbps: 10.0,
        }
    }
}

// ==========================================
// 房间规模档位阈值 (sq ft, 下限含)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub medium_min_sqft: f64,
    pub large_min_sqft: f64,
    pub auditorium_min_sqft: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            medium_min_sqft: 250.0,
            large_min_sqft: 400.0,
            auditorium_min_sqft: 800.0,
        }
    }
}

impl TierThresholds {
    pub fn tier_for_area(&self, area_sqft: f64) -> RoomTier {
        if area_sqft >= self.auditorium_min_sqft {
            RoomTier::Auditorium
        } else if area_sqft >= self.large_min_sqft {
            RoomTier::Large
        } else if area_sqft >= self.medium_min_sqft {
            RoomTier::Medium
        } else {
            RoomTier::Small
        }
    }
}

/// 按容纳人数自动追加的合规项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceThresholds {
    /// 超过该人数追加辅助听音系统
    pub assistive_listening_capacity: u32,
    /// 超过该人数追加感应线圈
    pub hearing_loop_capacity: u32,
}

impl Default for ComplianceThresholds {
    fn default() -> Self {
        Self {
            assistive_listening_capacity: 25,
            hearing_loop_capacity: 50,
        }
    }
}

// ==========================================
// 候选解析
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverWeights {
    pub brand: f64,
    pub price: f64,
    pub spec: f64,
    pub data_quality: f64,
}

impl Default for ResolverWeights {
    fn default() -> Self {
        Self {
            brand: 0.35,
            price: 0.25,
            spec: 0.25,
            data_quality: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub weights: ResolverWeights,
    /// 硬件价格下限（低于视为配件/服务）
    pub hardware_price_floor: f64,
    pub price_floor_categories: Vec<ProductCategory>,
    /// 未指定价格区间时的类目默认区间
    pub category_price_bands: BTreeMap<ProductCategory, PriceBand>,
    /// 预算档位在价格区间中的目标位置 (0~1)
    pub economy_price_position: f64,
    pub standard_price_position: f64,
    pub premium_price_position: f64,
    /// 有品牌偏好但不匹配时的品牌分
    pub brand_mismatch_score: f64,
    /// 规格缺失时的规格分
    pub missing_spec_score: f64,
    /// 配件与已选视频会议品牌不一致时的品牌分（软偏好）
    pub ecosystem_mismatch_score: f64,
    /// 子类目含这些词的需求跟随已选视频会议品牌
    pub ecosystem_accessory_terms: Vec<String>,
    /// 默认候选短名单长度
    pub shortlist_size: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        use ProductCategory::*;

        let bands = [
            (Displays, 300.0, 25_000.0),
            (Mounts, 50.0, 3_000.0),
            (VideoConferencing, 200.0, 30_000.0),
            (Audio, 50.0, 15_000.0),
            (ControlSystems, 100.0, 15_000.0),
            (SignalManagement, 50.0, 10_000.0),
            (Infrastructure, 50.0, 10_000.0),
            (Networking, 100.0, 15_000.0),
            (CablesConnectivity, 5.0, 2_000.0),
            (SoftwareServices, 0.0, 50_000.0),
            (Other, 0.0, 100_000.0),
        ];

        Self {
            weights: ResolverWeights::default(),
            hardware_price_floor: 50.0,
            price_floor_categories: vec![Displays, VideoConferencing],
            category_price_bands: bands
                .iter()
                .map(|(c, min, max)| (*c, PriceBand { min: *min, max: *max }))
                .collect(),
            economy_price_position: 0.25,
            standard_price_position: 0.5,
            premium_price_position: 0.75,
            brand_mismatch_score: 0.2,
            missing_spec_score: 0.5,
            ecosystem_mismatch_score: 0.6,
            ecosystem_accessory_terms: vec![
                "microphone".to_string(),
                "expansion".to_string(),
                "touch controller".to_string(),
            ],
            shortlist_size: 5,
        }
    }
}

// ==========================================
// 跨条目协调
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// strict 且优先级不大于该值的音频条目不被一体机替代
    pub protected_priority_max: u32,
    pub max_display_units: u32,
    pub max_display_size_spread_in: f64,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            protected_priority_max: 5,
            max_display_units: 4,
            max_display_size_spread_in: 20.0,
        }
    }
}

// ==========================================
// 质量评分
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityWeights {
    pub compliance: f64,
    pub completeness: f64,
    pub price_sanity: f64,
    pub brand_consistency: f64,
    pub confidence: f64,
    pub integration: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            compliance: 30.0,
            completeness: 25.0,
            price_sanity: 15.0,
            brand_consistency: 10.0,
            confidence: 10.0,
            integration: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub weights: QualityWeights,
    /// 显示尺寸容差带 (in): 带内满分;偏大超出带给一半分;偏小超出带 0 分并 CRITICAL
    pub display_tolerance_in: f64,
    /// 数量容差带（目标的比例）: 带内按比例给分,低于带 0 分并 CRITICAL
    pub count_tolerance_ratio: f64,
    /// 一体机折算的扬声器/麦克风数量
    pub integrated_device_equivalent: u32,
    pub mount_shortfall_penalty: f64,
    /// 所属类目仍有条目时,每个无候选的必选需求扣分
    pub unresolved_requirement_penalty: f64,
    pub zero_price_penalty: f64,
    pub high_price_threshold: f64,
    pub ecosystem_mismatch_penalty: f64,
    /// 品牌数阶梯: (最多品牌数, 得分比例)
    pub brand_steps: Vec<(usize, f64)>,
    pub grade_a_min: f64,
    pub grade_b_min: f64,
    pub grade_c_min: f64,
    pub grade_d_min: f64,
    pub ups_advisory_watts: f64,
    pub switch_advisory_mbps: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            weights: QualityWeights::default(),
            display_tolerance_in: 10.0,
            count_tolerance_ratio: 0.75,
            integrated_device_equivalent: 2,
            mount_shortfall_penalty: 5.0,
            unresolved_requirement_penalty: 4.0,
            zero_price_penalty: 3.0,
            high_price_threshold: 25_000.0,
            ecosystem_mismatch_penalty: 5.0,
            brand_steps: vec![(3, 1.0), (5, 0.8), (7, 0.6), (9, 0.4)],
            grade_a_min: 90.0,
            grade_b_min: 80.0,
            grade_c_min: 70.0,
            grade_d_min: 60.0,
            ups_advisory_watts: 1500.0,
            switch_advisory_mbps: 100.0,
        }
    }
}

// ==========================================
// 项目级合并建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// 每个房间至少预留的交换机端口
    pub min_ports_per_room: u32,
    /// 端口扩容余量系数
    pub port_overhead_ratio: f64,
    /// 可选交换机端口规格（升序）
    pub switch_port_sizes: Vec<u32>,
    /// 占用交换机端口的设备类目（扬声器除外）
    pub networked_categories: Vec<ProductCategory>,
    pub speakers_per_zone: u32,
    pub min_zones_per_room: u32,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        use ProductCategory::*;
        Self {
            min_ports_per_room: 8,
            port_overhead_ratio: 1.2,
            switch_port_sizes: vec![24, 48],
            networked_categories: vec![Displays, VideoConferencing, Audio, ControlSystems, SignalManagement],
            speakers_per_zone: 4,
            min_zones_per_room: 2,
        }
    }
}

impl EngineConfig {
    /// 从 JSON 文件叠加到内置默认值
    pub fn from_file(path: &Path) -> ConfigResult<EngineConfig> {
        let raw = std::fs::read_to_string(path)?;
        EngineConfig::default().overlay_json(&raw, &path.display().to_string())
    }

    /// 将部分 JSON 叠加到当前配置（对象逐层合并,其他值整体替换）
    pub fn overlay_json(&self, raw: &str, source_name: &str) -> ConfigResult<EngineConfig> {
        let parse_err = |e: serde_json::Error| ConfigError::ParseError {
            source_name: source_name.to_string(),
            message: e.to_string(),
        };

        let overlay: Value = serde_json::from_str(raw).map_err(parse_err)?;
        let mut base = serde_json::to_value(self).map_err(parse_err)?;
        merge_json(&mut base, overlay);

        let merged: EngineConfig = serde_json::from_value(base).map_err(parse_err)?;
        merged.validate()?;
        Ok(merged)
    }

    /// 校验常量表自洽性
    pub fn validate(&self) -> ConfigResult<()> {
        let sizes = &self.display.standard_sizes_in;
        if sizes.is_empty() {
            return Err(ConfigError::ValidationError(
                "display.standard_sizes_in 不能为空".to_string(),
            ));
        }
        if sizes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::ValidationError(format!(
                "display.standard_sizes_in 必须严格升序: {:?}",
                sizes
            )));
        }

        if self.geometry.min_ceiling_ft <= 0.0
            || self.geometry.min_ceiling_ft >= self.geometry.max_ceiling_ft
        {
            return Err(ConfigError::ValidationError(format!(
                "geometry 吊顶范围非法: [{}, {}]",
                self.geometry.min_ceiling_ft, self.geometry.max_ceiling_ft
            )));
        }

        let t = &self.tiers;
        if !(0.0 < t.medium_min_sqft
            && t.medium_min_sqft < t.large_min_sqft
            && t.large_min_sqft < t.auditorium_min_sqft)
        {
            return Err(ConfigError::ValidationError(
                "tiers 阈值必须为正且严格升序".to_string(),
            ));
        }

        if self.audio.low_ceiling_max_ft >= self.audio.mid_ceiling_max_ft {
            return Err(ConfigError::ValidationError(
                "audio 吊顶分档必须升序".to_string(),
            ));
        }
        let coverages = [
            self.audio.coverage_low_sqft,
            self.audio.coverage_mid_sqft,
            self.audio.coverage_high_sqft,
            self.audio.mic_area_coverage_sqft,
            self.audio.mic_table_spacing_ft,
        ];
        if coverages.iter().any(|c| *c <= 0.0) {
            return Err(ConfigError::ValidationError(
                "audio 覆盖面积/间距必须为正".to_string(),
            ));
        }

        if self.power.voltage <= 0.0 || self.power.safety_margin < 1.0 {
            return Err(ConfigError::ValidationError(
                "power.voltage 必须为正且 safety_margin 不小于 1".to_string(),
            ));
        }

        let w = &self.resolver.weights;
        let resolver_sum = w.brand + w.price + w.spec + w.data_quality;
        if (resolver_sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(ConfigError::ValidationError(format!(
                "resolver.weights 之和必须为 1,实际 {:.4}",
                resolver_sum
            )));
        }

        let q = &self.quality.weights;
        let quality_sum =
            q.compliance + q.completeness + q.price_sanity + q.brand_consistency + q.confidence + q.integration;
        if (quality_sum - 100.0).abs() > WEIGHT_EPSILON {
            return Err(ConfigError::ValidationError(format!(
                "quality.weights 之和必须为 100,实际 {:.2}",
                quality_sum
            )));
        }

        let p = &self.project;
        if p.switch_port_sizes.is_empty()
            || p.switch_port_sizes.contains(&0)
            || p.switch_port_sizes.windows(2).any(|w| w[0] >= w[1])
        {
            return Err(ConfigError::ValidationError(format!(
                "project.switch_port_sizes 必须非空、为正且严格升序: {:?}",
                p.switch_port_sizes
            )));
        }
        if p.port_overhead_ratio < 1.0 || p.speakers_per_zone == 0 {
            return Err(ConfigError::ValidationError(
                "project.port_overhead_ratio 不小于 1 且 speakers_per_zone 为正".to_string(),
            ));
        }

        let g = &self.quality;
        if !(g.grade_a_min > g.grade_b_min && g.grade_b_min > g.grade_c_min && g.grade_c_min > g.grade_d_min) {
            return Err(ConfigError::ValidationError(
                "quality 评级阈值必须严格降序".to_string(),
            ));
        }

        Ok(())
    }

    /// 预算档位对应的价格目标位置
    pub fn price_position(&self, tier: BudgetTier) -> f64 {
        match tier {
            BudgetTier::Economy => self.resolver.economy_price_position,
            BudgetTier::Standard => self.resolver.standard_price_position,
            BudgetTier::Premium => self.resolver.premium_price_position,
        }
    }
}

/// JSON 深度合并: 对象逐键递归,其余类型覆盖
fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
