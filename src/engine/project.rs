// ==========================================
// AV BOQ 生成引擎 - 项目级合并
// ==========================================
// 职责: 各房间 BOQ 生成后,汇总可共享的网络/功放/机柜
// 输入: 同一项目的多份 BOQ
// 输出: ProjectSummary（建议,不修改任何 BOQ）
// ==========================================

use crate::config::{EngineConfig, ProjectConfig};
use crate::domain::boq::{BillOfQuantities, SelectedItem};
use crate::domain::project::{AmplifierConsolidation, NetworkConsolidation, ProjectSummary, RackConsolidation};
use crate::domain::types::ProductCategory;
use std::sync::Arc;
use tracing::info;

// ==========================================
// ProjectConsolidator - 项目级合并
// ==========================================
pub struct ProjectConsolidator {
    config: Arc<EngineConfig>,
}

impl ProjectConsolidator {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    fn p(&self) -> &ProjectConfig {
        &self.config.project
    }

    /// 汇总项目
    ///
    /// 少于两个房间时没有可合并项,只返回合计
    pub fn summarize(&self, boqs: &[BillOfQuantities]) -> ProjectSummary {
        let project_id = boqs
            .first()
            .map(|b| b.metadata.project_id.clone())
            .unwrap_or_default();
        let mut summary = ProjectSummary {
            project_id,
            room_labels: boqs.iter().map(|b| b.metadata.room_label.clone()).collect(),
            hardware_total: boqs.iter().map(BillOfQuantities::hardware_total).sum(),
            network: None,
            amplifiers: None,
            racks: None,
            notes: Vec::new(),
        };

        if boqs.len() < 2 {
            return summary;
        }

        summary.network = Some(self.consolidate_network(boqs));
        summary.amplifiers = self.consolidate_amplifiers(boqs);
        summary.racks = consolidate_racks(boqs);
        summary.notes = notes(&summary);

        info!(
            project = %summary.project_id,
            rooms = boqs.len(),
            displaced = summary.displaced_total(),
            "项目合并建议完成"
        );
        summary
    }

    // ==========================================
    // 网络: 各房间交换机 → 集中式 PoE 交换机
    // ==========================================

    fn room_ports(&self, boq: &BillOfQuantities) -> u32 {
        let devices: u32 = boq
            .items
            .iter()
            .filter(|i| self.p().networked_categories.contains(&i.product.category))
            .filter(|i| !i.requirement.is_speaker())
            .map(|i| i.quantity)
            .sum();
        devices.max(self.p().min_ports_per_room)
    }

    fn consolidate_network(&self, boqs: &[BillOfQuantities]) -> NetworkConsolidation {
        let p = self.p();
        let raw: u32 = boqs.iter().map(|b| self.room_ports(b)).sum();
        let ports = (f64::from(raw) * p.port_overhead_ratio).ceil() as u32;

        let largest = p.switch_port_sizes.last().copied().unwrap_or(48).max(1);
        let (switch_type, switch_count) = match p.switch_port_sizes.iter().find(|size| ports <= **size) {
            Some(size) => (format!("{}-port Managed PoE+", size), 1),
            None => (
                format!("Stacked {}-port Managed PoE+", largest),
                ports.div_ceil(largest),
            ),
        };

        let switches = room_lines(boqs, |i| i.product.category == ProductCategory::Networking);
        NetworkConsolidation {
            switch_type,
            switch_count,
            ports,
            replaces_room_switches: switches.rooms,
            displaced_cost: switches.cost,
        }
    }

    // ==========================================
    // 功放: 至少两个房间有功放时建议集中式多分区功放
    // ==========================================

    fn consolidate_amplifiers(&self, boqs: &[BillOfQuantities]) -> Option<AmplifierConsolidation> {
        let p = self.p();
        let amplified: Vec<&BillOfQuantities> = boqs.iter().filter(|b| b.items.iter().any(is_amplifier)).collect();
        if amplified.len() < 2 {
            return None;
        }

        let channels = amplified
            .iter()
            .map(|b| {
                let speakers: u32 = b
                    .items
                    .iter()
                    .filter(|i| i.product.category == ProductCategory::Audio && i.requirement.is_speaker())
                    .map(|i| i.quantity)
                    .sum();
                speakers.div_ceil(p.speakers_per_zone).max(p.min_zones_per_room)
            })
            .sum();

        let amps = room_lines(boqs, is_amplifier);
        Some(AmplifierConsolidation {
            channels,
            replaces_room_amplifiers: amps.rooms,
            displaced_cost: amps.cost,
        })
    }
}

// ==========================================
// 机柜: 至少两个房间有机柜时建议共享机房机柜
// ==========================================

fn consolidate_racks(boqs: &[BillOfQuantities]) -> Option<RackConsolidation> {
    let racks = room_lines(boqs, is_rack);
    if racks.rooms < 2 {
        return None;
    }
    Some(RackConsolidation {
        replaces_room_racks: racks.rooms,
        displaced_cost: racks.cost,
    })
}

fn is_amplifier(item: &SelectedItem) -> bool {
    item.product.category == ProductCategory::Audio && item.requirement.sub_category.to_lowercase().contains("amplifier")
}

fn is_rack(item: &SelectedItem) -> bool {
    item.product.category == ProductCategory::Infrastructure && item.requirement.sub_category.to_lowercase().contains("rack")
}

/// 命中条目的房间数与金额
struct RoomLines {
    rooms: usize,
    cost: f64,
}

fn room_lines(boqs: &[BillOfQuantities], matches: impl Fn(&SelectedItem) -> bool) -> RoomLines {
    let mut lines = RoomLines { rooms: 0, cost: 0.0 };
    for boq in boqs {
        let cost: f64 = boq.items.iter().filter(|i| matches(*i)).map(SelectedItem::line_total).sum();
        if boq.items.iter().any(|i| matches(i)) {
            lines.rooms += 1;
            lines.cost += cost;
        }
    }
    lines
}

fn notes(summary: &ProjectSummary) -> Vec<String> {
    let mut notes = Vec::new();
    if let Some(network) = &summary.network {
        notes.push(format!(
            "{} x {} in a central IT room covers {} ports for {} rooms",
            network.switch_count,
            network.switch_type,
            network.ports,
            summary.room_labels.len()
        ));
    }
    if let Some(amps) = &summary.amplifiers {
        notes.push(format!(
            "Centralized {}-channel multi-zone amplifier can replace {} room amplifiers when the rooms share a floor or wing",
            amps.channels, amps.replaces_room_amplifiers
        ));
    }
    if let Some(racks) = &summary.racks {
        notes.push(format!(
            "Shared head-end rack can replace {} room racks",
            racks.replaces_room_racks
        ));
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::boq::{BoqMetadata, QualityReport, ReconciliationOutcome, SubScores};
    use crate::domain::catalog::{Capabilities, CatalogProduct};
    use crate::domain::requirement::{AbstractRequirement, KeywordRules};
    use crate::domain::room::RoomSpecification;
    use crate::domain::types::{BudgetTier, DataQuality, Grade, RequirementPurpose, RoomType};
    use crate::engine::assembler::Assembler;
    use crate::engine::requirement_calc::RequirementCalculator;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn consolidator() -> ProjectConsolidator {
        ProjectConsolidator::new(Arc::new(EngineConfig::default()))
    }

    fn line(key: &str, category: ProductCategory, sub_category: &str, quantity: u32, price: f64) -> SelectedItem {
        let requirement = AbstractRequirement {
            key: key.to_string(),
            category,
            sub_category: sub_category.to_string(),
            quantity,
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
        };
        let mut product = CatalogProduct {
            id: 0,
            name: format!("Model {}", key),
            brand: "Acme".to_string(),
            model_number: key.to_uppercase(),
            category,
            category_raw: category.label().to_string(),
            sub_category: sub_category.to_string(),
            price,
            description: String::new(),
            size_inches: None,
            power_watts: None,
            data_quality: DataQuality::Good,
            capabilities: Capabilities::default(),
            search_text: String::new(),
            tokens: BTreeSet::new(),
        };
        product.index_text();
        SelectedItem {
            product,
            requirement,
            quantity,
            confidence: 1.0,
        }
    }

    fn boq(label: &str, items: Vec<SelectedItem>) -> BillOfQuantities {
        let room = RoomSpecification::new(28.0, 20.0, 10.0, RoomType::StandardConference, 8, BudgetTier::Standard);
        let targets = RequirementCalculator::new(Arc::new(EngineConfig::default()))
            .compute(&room)
            .unwrap();
        let metadata = BoqMetadata {
            project_id: "PRJ-7".to_string(),
            room_label: label.to_string(),
            catalog_version: "t".to_string(),
            engine_version: "t".to_string(),
            generated_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
        };
        let report = QualityReport {
            sub_scores: SubScores::default(),
            total: 0.0,
            grade: Grade::F,
            warnings: Vec::new(),
            recommendations: Vec::new(),
            items_fingerprint: String::new(),
        };
        let outcome = ReconciliationOutcome {
            items,
            ..Default::default()
        };
        Assembler::assemble(metadata, room, targets, outcome, Vec::new(), report)
    }

    /// 大会议室: 显示 + 编解码器 + DSP + 2 吊麦 + 6 吊顶扬声器 + 功放 + 交换机 + 机柜
    fn conference_boq(label: &str) -> BillOfQuantities {
        use ProductCategory::*;
        boq(
            label,
            vec![
                line("primary_display", Displays, "Professional Display", 1, 4000.0),
                line("vc_codec", VideoConferencing, "Codec", 1, 8000.0),
                line("dsp", Audio, "DSP", 1, 2500.0),
                line("ceiling_microphones", Audio, "Ceiling Microphone", 2, 1200.0),
                line("ceiling_speakers", Audio, "Ceiling Speaker", 6, 150.0),
                line("amplifier", Audio, "Amplifier", 1, 900.0),
                line("network_switch", Networking, "Network Switch", 1, 700.0),
                line("equipment_rack", Infrastructure, "Equipment Rack", 1, 1500.0),
            ],
        )
    }

    fn huddle_boq(label: &str) -> BillOfQuantities {
        use ProductCategory::*;
        boq(
            label,
            vec![
                line("primary_display", Displays, "Professional Display", 1, 1200.0),
                line("video_bar", VideoConferencing, "Video Bar", 1, 1000.0),
                line("network_switch", Networking, "Network Switch", 1, 700.0),
            ],
        )
    }

    #[test]
    fn test_single_room_has_no_suggestions() {
        let room = conference_boq("Board Room");
        let summary = consolidator().summarize(std::slice::from_ref(&room));

        assert_eq!(summary.project_id, "PRJ-7");
        assert!(!summary.has_suggestions());
        assert!(summary.notes.is_empty());
        assert_eq!(summary.hardware_total, room.hardware_total());
        assert_eq!(summary.displaced_total(), 0.0);
    }

    #[test]
    fn test_two_conference_rooms_share_switch_amplifier_and_rack() {
        let rooms = vec![conference_boq("Board Room"), conference_boq("Training")];
        let summary = consolidator().summarize(&rooms);

        // 每间 6 个联网设备,按 8 口下限计: (8 + 8) x 1.2 → 20
        let network = summary.network.as_ref().unwrap();
        assert_eq!(network.ports, 20);
        assert_eq!(network.switch_type, "24-port Managed PoE+");
        assert_eq!(network.switch_count, 1);
        assert_eq!(network.replaces_room_switches, 2);
        assert_eq!(network.displaced_cost, 1400.0);

        // 6 只扬声器 / 4 = 2 分区
        let amps = summary.amplifiers.as_ref().unwrap();
        assert_eq!(amps.channels, 4);
        assert_eq!(amps.replaces_room_amplifiers, 2);
        assert_eq!(amps.displaced_cost, 1800.0);

        let racks = summary.racks.as_ref().unwrap();
        assert_eq!(racks.replaces_room_racks, 2);
        assert_eq!(racks.displaced_cost, 3000.0);

        assert_eq!(summary.displaced_total(), 6200.0);
        assert_eq!(summary.notes.len(), 3);
        assert_eq!(summary.room_labels, vec!["Board Room", "Training"]);
    }

    #[test]
    fn test_large_project_stacks_largest_switch() {
        let rooms: Vec<BillOfQuantities> = (0..7).map(|n| huddle_boq(&format!("Huddle {}", n))).collect();
        let summary = consolidator().summarize(&rooms);

        // 7 x 8 x 1.2 = 67.2 → 68 口
        let network = summary.network.unwrap();
        assert_eq!(network.ports, 68);
        assert_eq!(network.switch_type, "Stacked 48-port Managed PoE+");
        assert_eq!(network.switch_count, 2);
        assert_eq!(network.replaces_room_switches, 7);
    }

    #[test]
    fn test_amplifier_and_rack_need_two_rooms() {
        let rooms = vec![conference_boq("Board Room"), huddle_boq("Huddle")];
        let summary = consolidator().summarize(&rooms);

        assert!(summary.network.is_some());
        assert!(summary.amplifiers.is_none());
        assert!(summary.racks.is_none());
        assert_eq!(summary.notes.len(), 1);
    }

    #[test]
    fn test_summary_leaves_room_boqs_untouched() {
        let rooms = vec![conference_boq("Board Room"), conference_boq("Training")];
        let before = rooms.clone();
        let summary = consolidator().summarize(&rooms);

        assert_eq!(rooms, before);
        assert_eq!(summary.hardware_total, rooms.iter().map(BillOfQuantities::hardware_total).sum::<f64>());
    }
}
