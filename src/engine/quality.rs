// ==========================================
// AV BOQ 生成引擎 - 质量评分器
// ==========================================
// 职责: 对协调后的条目集合打分、评级并给出警告/建议
// 子项（分值即权重）: 合规 30 / 完整 25 / 价格合理 15 / 品牌 10 / 置信度 10 / 集成 10
// 红线: 只读输入,报告与条目集合指纹绑定
// ==========================================

use crate::config::{EngineConfig, QualityConfig};
use crate::domain::boq::{items_fingerprint, QualityReport, ReconciliationFlag, SelectedItem, SubScores, UnresolvedRequirement};
use crate::domain::requirement::AbstractRequirement;
use crate::domain::room::RoomSpecification;
use crate::domain::targets::EngineeringTargets;
use crate::domain::types::{FlagKind, Grade, ProductCategory};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// 评分输入（全部为借用）
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub room: &'a RoomSpecification,
    pub targets: &'a EngineeringTargets,
    pub requirements: &'a [AbstractRequirement],
    pub items: &'a [SelectedItem],
    pub unresolved: &'a [UnresolvedRequirement],
    pub flags: &'a [ReconciliationFlag],
}

#[derive(Default)]
struct Notes {
    warnings: Vec<String>,
    recommendations: Vec<String>,
}

// ==========================================
// QualityScorer - 质量评分器
// ==========================================
pub struct QualityScorer {
    config: Arc<EngineConfig>,
}

impl QualityScorer {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    fn q(&self) -> &QualityConfig {
        &self.config.quality
    }

    /// 评分并生成报告
    pub fn score(&self, input: &ScoringInput<'_>) -> QualityReport {
        let mut notes = Notes::default();

        let sub_scores = SubScores {
            compliance: self.compliance(input, &mut notes),
            completeness: self.completeness(input, &mut notes),
            price_sanity: self.price_sanity(input, &mut notes),
            brand_consistency: self.brand_consistency(input),
            confidence: self.confidence(input),
            integration: self.integration(input, &mut notes),
        };
        self.advisories(input, &mut notes);

        let total = (sub_scores.compliance
            + sub_scores.completeness
            + sub_scores.price_sanity
            + sub_scores.brand_consistency
            + sub_scores.confidence
            + sub_scores.integration)
            .clamp(0.0, 100.0);
        let grade = self.grade(total);

        debug!(
            total,
            grade = %grade,
            warnings = notes.warnings.len(),
            recommendations = notes.recommendations.len(),
            "质量评分完成"
        );

        QualityReport {
            sub_scores,
            total,
            grade,
            warnings: notes.warnings,
            recommendations: notes.recommendations,
            items_fingerprint: items_fingerprint(input.items),
        }
    }

    pub fn grade(&self, total: f64) -> Grade {
        let q = self.q();
        if total >= q.grade_a_min {
            Grade::A
        } else if total >= q.grade_b_min {
            Grade::B
        } else if total >= q.grade_c_min {
            Grade::C
        } else if total >= q.grade_d_min {
            Grade::D
        } else {
            Grade::F
        }
    }

    // ==========================================
    // 合规: 显示尺寸 / 扬声器数量 / 麦克风数量 各占 1/3
    // ==========================================

    fn compliance(&self, input: &ScoringInput<'_>, notes: &mut Notes) -> f64 {
        let share = self.q().weights.compliance / 3.0;
        let targets = input.targets;

        // 显示尺寸
        let recommended = f64::from(targets.recommended_display_in);
        let display_points = match input
            .items
            .iter()
            .find(|i| i.product.category == ProductCategory::Displays)
        {
            None => {
                notes.warnings.push(format!(
                    "CRITICAL: No display selected; {}in recommended for a {:.1}ft viewing distance",
                    targets.recommended_display_in, targets.max_viewing_distance_ft
                ));
                0.0
            }
            Some(item) => match item.product.size_inches {
                Some(size) if (size - recommended).abs() <= self.q().display_tolerance_in => share,
                Some(size) if size < recommended => {
                    notes.warnings.push(format!(
                        "CRITICAL: Display size {:.0}in is far below the recommended {}in for a {:.1}ft viewing distance",
                        size, targets.recommended_display_in, targets.max_viewing_distance_ft
                    ));
                    0.0
                }
                Some(size) => {
                    notes.warnings.push(format!(
                        "Display size {:.0}in exceeds the recommended {}in",
                        size, targets.recommended_display_in
                    ));
                    share * 0.5
                }
                None => {
                    notes
                        .warnings
                        .push(format!("Display size unknown for {}; verify against {}in", item.product.name, targets.recommended_display_in));
                    share * 0.5
                }
            },
        };

        let speakers = self.provided(input.items, |i| i.requirement.is_speaker(), |i| {
            i.product.capabilities.integrated_speakers
        });
        let speaker_points = self.count_points(share, speakers, targets.speaker_count, "speaker", notes);

        let mics = self.provided(input.items, |i| i.requirement.is_microphone(), |i| {
            i.product.capabilities.integrated_microphones
        });
        let mic_points = self.count_points(share, mics, targets.microphone_count, "microphone", notes);

        display_points + speaker_points + mic_points
    }

    /// 实际提供数量: 独立设备数量 + 一体机折算
    fn provided(
        &self,
        items: &[SelectedItem],
        standalone: impl Fn(&SelectedItem) -> bool,
        integrated: impl Fn(&SelectedItem) -> bool,
    ) -> u32 {
        let equivalent = self.q().integrated_device_equivalent;
        items
            .iter()
            .map(|i| {
                if i.product.category == ProductCategory::Audio && standalone(i) {
                    i.quantity
                } else if integrated(i) {
                    i.quantity * equivalent
                } else {
                    0
                }
            })
            .sum()
    }

    fn count_points(&self, share: f64, provided: u32, required: u32, label: &str, notes: &mut Notes) -> f64 {
        if required == 0 || provided >= required {
            return share;
        }
        let ratio = f64::from(provided) / f64::from(required);
        if ratio >= self.q().count_tolerance_ratio {
            notes.warnings.push(format!(
                "{} {}s provided, {} calculated for coverage",
                provided, label, required
            ));
            share * ratio
        } else {
            notes.warnings.push(format!(
                "CRITICAL: Only {} {}s provided, {} required for coverage",
                provided, label, required
            ));
            0.0
        }
    }

    // ==========================================
    // 完整性: 必选类目覆盖 + 未满足的必选需求 + 支架数量
    // ==========================================

    fn completeness(&self, input: &ScoringInput<'_>, notes: &mut Notes) -> f64 {
        let weight = self.q().weights.completeness;

        let required: BTreeSet<ProductCategory> = input
            .requirements
            .iter()
            .filter(|r| r.mandatory)
            .map(|r| r.category)
            .collect();
        let present: BTreeSet<ProductCategory> = input.items.iter().map(|i| i.product.category).collect();

        let mut points = if required.is_empty() {
            weight
        } else {
            let covered = required.iter().filter(|c| present.contains(c)).count();
            weight * covered as f64 / required.len() as f64
        };

        for category in required.iter().filter(|c| !present.contains(c)) {
            notes.warnings.push(format!(
                "CRITICAL: No {} in BOQ although the room requires them",
                category
            ));
        }

        for miss in input.unresolved {
            let req = &miss.requirement;
            notes.warnings.push(format!(
                "No catalog candidate for {} ({} / {}), last candidates eliminated at {}",
                req.key, req.category, req.sub_category, miss.eliminated_at
            ));
            // 类目整体缺失已在覆盖率中扣分
            if req.mandatory && present.contains(&req.category) {
                points -= self.q().unresolved_requirement_penalty;
            }
        }

        let display_units = units(input.items, ProductCategory::Displays);
        let mount_units = units(input.items, ProductCategory::Mounts);
        if display_units > 0 && mount_units < display_units {
            points -= self.q().mount_shortfall_penalty;
            notes.warnings.push(format!(
                "{} mounts for {} displays",
                mount_units, display_units
            ));
        }

        points.max(0.0)
    }

    // ==========================================
    // 价格合理性
    // ==========================================

    fn price_sanity(&self, input: &ScoringInput<'_>, notes: &mut Notes) -> f64 {
        let q = self.q();
        let mut points = q.weights.price_sanity;

        for item in input.items {
            if !item.product.has_price() {
                points -= q.zero_price_penalty;
                notes
                    .warnings
                    .push(format!("{} has no catalog price", item.product.name));
            } else if item.product.price > q.high_price_threshold {
                notes.recommendations.push(format!(
                    "Verify pricing for {} (${:.2} unit price)",
                    item.product.name, item.product.price
                ));
            }
        }

        points.max(0.0)
    }

    // ==========================================
    // 品牌一致性（阶梯函数）
    // ==========================================

    fn brand_consistency(&self, input: &ScoringInput<'_>) -> f64 {
        let q = self.q();
        let brands: BTreeSet<String> = input
            .items
            .iter()
            .filter(|i| i.product.category.is_hardware())
            .map(|i| i.product.brand.trim().to_lowercase())
            .filter(|b| !b.is_empty())
            .collect();

        let factor = q
            .brand_steps
            .iter()
            .find(|(max_brands, _)| brands.len() <= *max_brands)
            .map(|(_, factor)| *factor)
            .unwrap_or(0.2);
        q.weights.brand_consistency * factor
    }

    fn confidence(&self, input: &ScoringInput<'_>) -> f64 {
        if input.items.is_empty() {
            return 0.0;
        }
        let mean = input.items.iter().map(|i| i.confidence).sum::<f64>() / input.items.len() as f64;
        self.q().weights.confidence * mean.clamp(0.0, 1.0)
    }

    // ==========================================
    // 系统集成一致性
    // ==========================================

    fn integration(&self, input: &ScoringInput<'_>, notes: &mut Notes) -> f64 {
        let q = self.q();
        let mut points = q.weights.integration;
        for flag in input.flags {
            if flag.kind == FlagKind::EcosystemMismatch {
                points -= q.ecosystem_mismatch_penalty;
            }
            notes.warnings.push(format!("{}: {}", flag.kind, flag.message));
        }
        points.max(0.0)
    }

    // ==========================================
    // 工程建议
    // ==========================================

    fn advisories(&self, input: &ScoringInput<'_>, notes: &mut Notes) {
        let q = self.q();
        let targets = input.targets;

        let has_ups = input.items.iter().any(|i| {
            i.product.category == ProductCategory::Infrastructure && i.product.tokens.contains("ups")
        });
        if targets.power_draw_watts > q.ups_advisory_watts && !has_ups {
            notes.recommendations.push(format!(
                "UPS recommended: estimated load {:.0} W ({:.0} VA)",
                targets.power_draw_watts, targets.ups_va
            ));
        }

        let has_switch = input.items.iter().any(|i| i.product.category == ProductCategory::Networking);
        if targets.network_bandwidth_mbps > q.switch_advisory_mbps && !has_switch {
            notes.recommendations.push(format!(
                "Managed network switch advised for {:.1} Mbps of AV traffic",
                targets.network_bandwidth_mbps
            ));
        }

        if targets.exceeds_standard_sizes {
            notes.recommendations.push(format!(
                "Computed image requires {:.0}in diagonal; consider a video wall, direct-view LED or projection",
                targets.computed_diagonal_in
            ));
        }

        notes.recommendations.push(format!(
            "Power: {:.0} W at {:.1} A, provide {}",
            targets.power_draw_watts, targets.power_amps, targets.circuit_rating
        ));

        let profile = input.room.profile();
        if input.room.capacity < profile.capacity_min || input.room.capacity > profile.capacity_max {
            notes.recommendations.push(format!(
                "Occupancy of {} is outside the typical {}-{} seats for a {}; confirm the room type",
                input.room.capacity, profile.capacity_min, profile.capacity_max, input.room.room_type
            ));
        }

        if input.room.capacity > self.config.compliance.assistive_listening_capacity {
            notes.recommendations.push(format!(
                "Occupancy of {} requires assistive listening coverage",
                input.room.capacity
            ));
        }
    }
}

fn units(items: &[SelectedItem], category: ProductCategory) -> u32 {
    items
        .iter()
        .filter(|i| i.product.category == category)
        .map(|i| i.quantity)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Capabilities, CatalogProduct};
    use crate::domain::requirement::KeywordRules;
    use crate::domain::types::{BudgetTier, DataQuality, FilterStage, ReasonCode, RequirementPurpose, RoomType};
    use crate::engine::requirement_calc::RequirementCalculator;
    use std::collections::BTreeSet;

    fn config() -> Arc<EngineConfig> {
        Arc::new(EngineConfig::default())
    }

    fn room() -> RoomSpecification {
        RoomSpecification::new(12.0, 10.0, 9.0, RoomType::SmallHuddle, 3, BudgetTier::Standard)
    }

    fn requirement(key: &str, category: ProductCategory, sub_category: &str) -> AbstractRequirement {
        AbstractRequirement {
            key: key.to_string(),
            category,
            sub_category: sub_category.to_string(),
            quantity: 1,
            priority: 1,
            keywords: KeywordRules::default(),
            size_range: None,
            power_range: None,
            min_price: None,
            max_price: None,
            strict: true,
            purpose: RequirementPurpose::Core,
            mandatory: true,
            rationale: String::new(),
        }
    }

    fn item(req: &AbstractRequirement, brand: &str, price: f64, caps: Capabilities) -> SelectedItem {
        let mut product = CatalogProduct {
            id: 0,
            name: format!("{} {}", brand, req.key),
            brand: brand.to_string(),
            model_number: req.key.to_uppercase(),
            category: req.category,
            category_raw: req.category.label().to_string(),
            sub_category: req.sub_category.clone(),
            price,
            description: String::new(),
            size_inches: None,
            power_watts: None,
            data_quality: DataQuality::Good,
            capabilities: caps,
            search_text: String::new(),
            tokens: BTreeSet::new(),
        };
        product.index_text();
        SelectedItem {
            product,
            requirement: req.clone(),
            quantity: req.quantity,
            confidence: 1.0,
        }
    }

    /// 小会议室完整方案: 显示 + 支架 + 视频条
    fn huddle_fixture(targets: &EngineeringTargets) -> (Vec<AbstractRequirement>, Vec<SelectedItem>) {
        let display_req = requirement("primary_display", ProductCategory::Displays, "Professional Display");
        let mount_req = requirement("display_mount", ProductCategory::Mounts, "Display Mount");
        let bar_req = requirement("video_bar", ProductCategory::VideoConferencing, "Video Bar");

        let mut display = item(&display_req, "Samsung", 1200.0, Capabilities::default());
        display.product.size_inches = Some(f64::from(targets.recommended_display_in));
        let mount = item(&mount_req, "Samsung", 200.0, Capabilities::default());
        let bar = item(
            &bar_req,
            "Samsung",
            2500.0,
            Capabilities {
                integrated_microphones: true,
                integrated_speakers: true,
                integrated_camera: true,
                ..Default::default()
            },
        );
        (vec![display_req, mount_req, bar_req], vec![display, mount, bar])
    }

    fn score(
        room: &RoomSpecification,
        targets: &EngineeringTargets,
        reqs: &[AbstractRequirement],
        items: &[SelectedItem],
        unresolved: &[UnresolvedRequirement],
        flags: &[ReconciliationFlag],
    ) -> QualityReport {
        QualityScorer::new(config()).score(&ScoringInput {
            room,
            targets,
            requirements: reqs,
            items,
            unresolved,
            flags,
        })
    }

    #[test]
    fn test_complete_huddle_scores_a() {
        let room = room();
        let targets = RequirementCalculator::new(config()).compute(&room).unwrap();
        let (reqs, items) = huddle_fixture(&targets);

        let report = score(&room, &targets, &reqs, &items, &[], &[]);
        assert_eq!(report.sub_scores.completeness, 25.0);
        assert_eq!(report.sub_scores.price_sanity, 15.0);
        assert_eq!(report.sub_scores.brand_consistency, 10.0);
        assert!((report.sub_scores.compliance - 30.0).abs() < 1e-9);
        assert!((report.total - 100.0).abs() < 1e-9);
        assert_eq!(report.grade, Grade::A);
        assert_eq!(report.items_fingerprint, items_fingerprint(&items));
    }

    #[test]
    fn test_missing_display_is_critical() {
        let room = room();
        let targets = RequirementCalculator::new(config()).compute(&room).unwrap();
        let (reqs, items) = huddle_fixture(&targets);
        let without_display: Vec<SelectedItem> = items
            .into_iter()
            .filter(|i| i.product.category != ProductCategory::Displays)
            .collect();
        let unresolved = vec![UnresolvedRequirement {
            requirement: reqs[0].clone(),
            reason: ReasonCode::NoCandidate,
            eliminated_at: FilterStage::Category,
        }];

        let report = score(&room, &targets, &reqs, &without_display, &unresolved, &[]);
        assert!(report.sub_scores.completeness < 25.0);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.starts_with("CRITICAL") && w.contains("Displays")));
        assert!(report.warnings.iter().any(|w| w.contains("primary_display")));
    }

    #[test]
    fn test_unresolved_requirement_penalized_when_category_covered() {
        let room = room();
        let targets = RequirementCalculator::new(config()).compute(&room).unwrap();
        let (mut reqs, items) = huddle_fixture(&targets);
        // 视频会议类目已由视频条覆盖
        let camera = requirement("ptz_camera", ProductCategory::VideoConferencing, "PTZ Camera");
        let mut panel = requirement("scheduling_panel", ProductCategory::ControlSystems, "Scheduling Panel");
        panel.mandatory = false;
        reqs.push(camera.clone());
        reqs.push(panel.clone());

        let miss = |requirement: AbstractRequirement| UnresolvedRequirement {
            requirement,
            reason: ReasonCode::NoCandidate,
            eliminated_at: FilterStage::Category,
        };

        let report = score(&room, &targets, &reqs, &items, &[miss(camera)], &[]);
        assert_eq!(report.sub_scores.completeness, 21.0);
        assert!(report.warnings.iter().any(|w| w.contains("ptz_camera")));
        assert!(!report.warnings.iter().any(|w| w.starts_with("CRITICAL")));

        // 可选需求无候选只记警告
        let report = score(&room, &targets, &reqs, &items, &[miss(panel)], &[]);
        assert_eq!(report.sub_scores.completeness, 25.0);
        assert!(report.warnings.iter().any(|w| w.contains("scheduling_panel")));
    }

    fn audio_item(key: &str, sub_category: &str, quantity: u32) -> SelectedItem {
        let mut req = requirement(key, ProductCategory::Audio, sub_category);
        req.quantity = quantity;
        item(&req, "Shure", 500.0, Capabilities::default())
    }

    /// 标准会议室: 目标 4 只扬声器 / 2 只麦克风
    fn conference_items(speakers: u32, mics: u32) -> (RoomSpecification, EngineeringTargets, Vec<SelectedItem>) {
        let room = RoomSpecification::new(28.0, 20.0, 10.0, RoomType::StandardConference, 8, BudgetTier::Standard);
        let targets = RequirementCalculator::new(config()).compute(&room).unwrap();
        assert_eq!((targets.speaker_count, targets.microphone_count), (4, 2));

        let display_req = requirement("primary_display", ProductCategory::Displays, "Professional Display");
        let mut display = item(&display_req, "Samsung", 4200.0, Capabilities::default());
        display.product.size_inches = Some(f64::from(targets.recommended_display_in));
        let items = vec![
            display,
            audio_item("ceiling_speakers", "Ceiling Speaker", speakers),
            audio_item("ceiling_microphones", "Ceiling Microphone", mics),
        ];
        (room, targets, items)
    }

    #[test]
    fn test_far_below_counts_get_zero_credit() {
        let (room, targets, items) = conference_items(1, 1);
        let reqs: Vec<AbstractRequirement> = items.iter().map(|i| i.requirement.clone()).collect();

        let report = score(&room, &targets, &reqs, &items, &[], &[]);
        // 只剩显示尺寸的 1/3
        assert!((report.sub_scores.compliance - 10.0).abs() < 1e-9);
        assert_eq!(
            report
                .warnings
                .iter()
                .filter(|w| w.starts_with("CRITICAL: Only 1"))
                .count(),
            2
        );
    }

    #[test]
    fn test_counts_within_tolerance_get_partial_credit() {
        let (room, targets, items) = conference_items(3, 2);
        let reqs: Vec<AbstractRequirement> = items.iter().map(|i| i.requirement.clone()).collect();

        let report = score(&room, &targets, &reqs, &items, &[], &[]);
        assert!((report.sub_scores.compliance - 27.5).abs() < 1e-9);
        assert!(report.warnings.iter().any(|w| w.starts_with("3 speakers provided")));
        assert!(!report.warnings.iter().any(|w| w.starts_with("CRITICAL")));
    }

    #[test]
    fn test_display_far_below_recommended_is_critical() {
        let room = room();
        let targets = RequirementCalculator::new(config()).compute(&room).unwrap();
        let (reqs, mut items) = huddle_fixture(&targets);
        items[0].product.size_inches = Some(f64::from(targets.recommended_display_in) - 20.0);

        let report = score(&room, &targets, &reqs, &items, &[], &[]);
        assert!((report.sub_scores.compliance - 20.0).abs() < 1e-9);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.starts_with("CRITICAL: Display size") && w.contains("far below")));

        // 偏大超出容差只给一半分,不算严重
        items[0].product.size_inches = Some(f64::from(targets.recommended_display_in) + 20.0);
        let report = score(&room, &targets, &reqs, &items, &[], &[]);
        assert!((report.sub_scores.compliance - 25.0).abs() < 1e-9);
        assert!(!report.warnings.iter().any(|w| w.starts_with("CRITICAL")));
    }

    #[test]
    fn test_occupancy_outside_profile_range_is_advised() {
        let crowded = RoomSpecification::new(12.0, 10.0, 9.0, RoomType::SmallHuddle, 8, BudgetTier::Standard);
        let targets = RequirementCalculator::new(config()).compute(&crowded).unwrap();
        let report = score(&crowded, &targets, &[], &[], &[], &[]);
        assert!(report.recommendations.iter().any(|r| r.contains("typical 2-3 seats")));

        let fitting = room();
        let targets = RequirementCalculator::new(config()).compute(&fitting).unwrap();
        let report = score(&fitting, &targets, &[], &[], &[], &[]);
        assert!(!report.recommendations.iter().any(|r| r.contains("typical")));
    }

    #[test]
    fn test_zero_price_and_mount_penalties() {
        let room = room();
        let targets = RequirementCalculator::new(config()).compute(&room).unwrap();
        let (reqs, mut items) = huddle_fixture(&targets);
        items[2].product.price = 0.0;
        items.remove(1); // 去掉支架

        let report = score(&room, &targets, &reqs, &items, &[], &[]);
        assert_eq!(report.sub_scores.price_sanity, 12.0);
        assert!(report.warnings.iter().any(|w| w.contains("0 mounts for 1 displays")));
    }

    #[test]
    fn test_ecosystem_flags_reduce_integration() {
        let room = room();
        let targets = RequirementCalculator::new(config()).compute(&room).unwrap();
        let (reqs, items) = huddle_fixture(&targets);
        let flag = ReconciliationFlag {
            kind: FlagKind::EcosystemMismatch,
            message: "Poly control cannot drive Logitech video system".to_string(),
            items: vec!["vc_touch_controller".to_string(), "video_bar".to_string()],
        };

        let report = score(&room, &targets, &reqs, &items, &[], &[flag]);
        assert_eq!(report.sub_scores.integration, 5.0);
        assert!(report.warnings.iter().any(|w| w.starts_with("ECOSYSTEM_MISMATCH")));
    }

    #[test]
    fn test_brand_steps() {
        let room = room();
        let targets = RequirementCalculator::new(config()).compute(&room).unwrap();
        let (reqs, mut items) = huddle_fixture(&targets);
        let brands = ["A", "B", "C", "D"];
        let base = items[0].clone();
        items = brands
            .iter()
            .map(|b| {
                let mut i = base.clone();
                i.product.brand = b.to_string();
                i
            })
            .collect();

        let report = score(&room, &targets, &reqs, &items, &[], &[]);
        assert!((report.sub_scores.brand_consistency - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_grade_thresholds() {
        let scorer = QualityScorer::new(config());
        assert_eq!(scorer.grade(90.0), Grade::A);
        assert_eq!(scorer.grade(89.9), Grade::B);
        assert_eq!(scorer.grade(70.0), Grade::C);
        assert_eq!(scorer.grade(60.0), Grade::D);
        assert_eq!(scorer.grade(59.9), Grade::F);
    }

    #[test]
    fn test_large_room_advisories() {
        let room = RoomSpecification::new(90.0, 60.0, 20.0, RoomType::MultipurposeEvent, 200, BudgetTier::Premium);
        let targets = RequirementCalculator::new(config()).compute(&room).unwrap();
        assert!(targets.exceeds_standard_sizes);

        let report = score(&room, &targets, &[], &[], &[], &[]);
        assert!(report.recommendations.iter().any(|r| r.contains("video wall")));
        assert!(report.recommendations.iter().any(|r| r.contains("Managed network switch")));
        assert_eq!(report.sub_scores.confidence, 0.0);
    }
}
