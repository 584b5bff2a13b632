// ==========================================
// AV BOQ 生成引擎 - 跨条目协调器
// ==========================================
// 职责: 已选条目之间的替代/兼容/异常配置检查
// 规则 1: 一体机内置拾音/扩声 → 移除通用音频条目
// 规则 2: 控制-视频会议生态表 + 麦克风-DSP 生态表 → 不兼容标记
// 规则 3: 显示数量/尺寸差异异常 → 异常配置标记
// 红线: 纯函数且幂等,只移除或标记,不新增条目
// ==========================================

use crate::config::{EngineConfig, ReconcilerConfig};
use crate::domain::boq::{ReconciliationFlag, ReconciliationOutcome, RemovedItem, SelectedItem};
use crate::domain::types::{Ecosystem, FlagKind, ProductCategory, RequirementPurpose};
use std::sync::Arc;
use tracing::debug;

use Ecosystem::*;

/// 控制系统生态 → 可兼容的视频会议生态
///
/// 会议厂商自带的触控器只能控制本厂商设备
pub static CONTROL_VC_COMPATIBILITY: &[(Ecosystem, &[Ecosystem])] = &[
    (Crestron, &[Cisco, Poly, Logitech, Yealink, Neat]),
    (Extron, &[Cisco, Poly, Logitech, Yealink]),
    (Amx, &[Cisco, Poly]),
    (Qsc, &[Cisco, Poly, Logitech, Yealink, Neat]),
    (Cisco, &[Cisco]),
    (Poly, &[Poly]),
    (Logitech, &[Logitech]),
    (Yealink, &[Yealink]),
    (Neat, &[Neat]),
];

/// 麦克风生态 → 可兼容的 DSP 生态
pub static MIC_DSP_COMPATIBILITY: &[(Ecosystem, &[Ecosystem])] = &[
    (Biamp, &[Biamp]),
    (Shure, &[Shure, Biamp, Qsc]),
    (Sennheiser, &[Sennheiser, Biamp, Qsc, Shure]),
    (Qsc, &[Qsc]),
];

fn compatible(table: &[(Ecosystem, &[Ecosystem])], source: Ecosystem, target: Ecosystem) -> Option<bool> {
    table
        .iter()
        .find(|(eco, _)| *eco == source)
        .map(|(_, allowed)| allowed.contains(&target))
}

// ==========================================
// CrossItemReconciler - 跨条目协调器
// ==========================================
pub struct CrossItemReconciler {
    config: ReconcilerConfig,
}

impl CrossItemReconciler {
    pub fn new(config: &ReconcilerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn from_engine_config(config: Arc<EngineConfig>) -> Self {
        Self::new(&config.reconciler)
    }

    /// 协调已选条目（顺序保持）
    pub fn reconcile(&self, items: Vec<SelectedItem>) -> ReconciliationOutcome {
        let (items, removed) = self.apply_integration(items);

        let mut flags = Vec::new();
        flags.extend(self.check_control_ecosystem(&items));
        flags.extend(self.check_audio_ecosystem(&items));
        flags.extend(self.check_display_configuration(&items));

        debug!(
            kept = items.len(),
            removed = removed.len(),
            flags = flags.len(),
            "跨条目协调完成"
        );

        ReconciliationOutcome { items, flags, removed }
    }

    // ==========================================
    // 规则 1: 一体机替代
    // ==========================================

    fn apply_integration(&self, items: Vec<SelectedItem>) -> (Vec<SelectedItem>, Vec<RemovedItem>) {
        let mic_source = items
            .iter()
            .find(|i| i.product.capabilities.integrated_microphones)
            .map(|i| i.product.name.clone());
        let speaker_source = items
            .iter()
            .find(|i| i.product.capabilities.integrated_speakers)
            .map(|i| i.product.name.clone());

        if mic_source.is_none() && speaker_source.is_none() {
            return (items, Vec::new());
        }

        let mut kept = Vec::with_capacity(items.len());
        let mut removed = Vec::new();
        for item in items {
            let req = &item.requirement;
            let protected = req.strict && req.priority <= self.config.protected_priority_max;
            let replaced_by = if req.purpose != RequirementPurpose::GenericAudio || protected {
                None
            } else if req.is_microphone() {
                mic_source.as_ref().map(|src| format!("microphones integrated in {}", src))
            } else if req.is_speaker() {
                speaker_source.as_ref().map(|src| format!("speakers integrated in {}", src))
            } else {
                None
            };

            match replaced_by {
                Some(reason) => {
                    debug!(key = %req.key, reason = %reason, "通用音频条目被一体机替代");
                    removed.push(RemovedItem {
                        reason: format!("Replaced by {}", reason),
                        item,
                    });
                }
                None => kept.push(item),
            }
        }
        (kept, removed)
    }

    // ==========================================
    // 规则 2: 生态兼容
    // ==========================================

    fn check_control_ecosystem(&self, items: &[SelectedItem]) -> Vec<ReconciliationFlag> {
        let vc: Vec<&SelectedItem> = items
            .iter()
            .filter(|i| i.product.category == ProductCategory::VideoConferencing)
            .collect();

        let mut flags = Vec::new();
        for control in items
            .iter()
            .filter(|i| i.product.category == ProductCategory::ControlSystems)
        {
            let Some(control_eco) = control.product.capabilities.ecosystem else {
                continue;
            };
            for video in &vc {
                let Some(vc_eco) = video.product.capabilities.ecosystem else {
                    continue;
                };
                if compatible(CONTROL_VC_COMPATIBILITY, control_eco, vc_eco) == Some(false) {
                    flags.push(ReconciliationFlag {
                        kind: FlagKind::EcosystemMismatch,
                        message: format!(
                            "{} control ({}) cannot drive {} video system ({})",
                            control_eco, control.product.name, vc_eco, video.product.name
                        ),
                        items: vec![control.requirement.key.clone(), video.requirement.key.clone()],
                    });
                }
            }
        }
        flags
    }

    fn check_audio_ecosystem(&self, items: &[SelectedItem]) -> Vec<ReconciliationFlag> {
        let dsps: Vec<&SelectedItem> = items
            .iter()
            .filter(|i| {
                i.product.category == ProductCategory::Audio
                    && i.requirement.sub_category.trim().eq_ignore_ascii_case("dsp")
            })
            .collect();

        let mut flags = Vec::new();
        for dsp in &dsps {
            if dsp.product.capabilities.is_mixer {
                flags.push(ReconciliationFlag {
                    kind: FlagKind::EcosystemMismatch,
                    message: format!(
                        "{} is a mixer and provides no echo cancellation for the DSP role",
                        dsp.product.name
                    ),
                    items: vec![dsp.requirement.key.clone()],
                });
            }
        }

        for mic in items
            .iter()
            .filter(|i| i.product.category == ProductCategory::Audio && i.requirement.is_microphone())
        {
            let Some(mic_eco) = mic.product.capabilities.ecosystem else {
                continue;
            };
            for dsp in &dsps {
                let Some(dsp_eco) = dsp.product.capabilities.ecosystem else {
                    continue;
                };
                if compatible(MIC_DSP_COMPATIBILITY, mic_eco, dsp_eco) == Some(false) {
                    flags.push(ReconciliationFlag {
                        kind: FlagKind::EcosystemMismatch,
                        message: format!(
                            "{} microphones ({}) are not supported by {} DSP ({})",
                            mic_eco, mic.product.name, dsp_eco, dsp.product.name
                        ),
                        items: vec![mic.requirement.key.clone(), dsp.requirement.key.clone()],
                    });
                }
            }
        }
        flags
    }

    // ==========================================
    // 规则 3: 显示配置
    // ==========================================

    fn check_display_configuration(&self, items: &[SelectedItem]) -> Vec<ReconciliationFlag> {
        let displays: Vec<&SelectedItem> = items
            .iter()
            .filter(|i| i.product.category == ProductCategory::Displays)
            .collect();
        if displays.is_empty() {
            return Vec::new();
        }

        let keys: Vec<String> = displays.iter().map(|i| i.requirement.key.clone()).collect();
        let mut flags = Vec::new();

        let units: u32 = displays.iter().map(|i| i.quantity).sum();
        if units > self.config.max_display_units {
            flags.push(ReconciliationFlag {
                kind: FlagKind::UnusualConfiguration,
                message: format!(
                    "{} display units exceed the usual maximum of {}",
                    units, self.config.max_display_units
                ),
                items: keys.clone(),
            });
        }

        let sizes: Vec<f64> = displays.iter().filter_map(|i| i.product.size_inches).collect();
        if let (Some(min), Some(max)) = (
            sizes.iter().copied().reduce(f64::min),
            sizes.iter().copied().reduce(f64::max),
        ) {
            if max - min > self.config.max_display_size_spread_in {
                flags.push(ReconciliationFlag {
                    kind: FlagKind::UnusualConfiguration,
                    message: format!(
                        "Display sizes range from {:.0}in to {:.0}in, spread exceeds {:.0}in",
                        min, max, self.config.max_display_size_spread_in
                    ),
                    items: keys,
                });
            }
        }

        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Capabilities, CatalogProduct};
    use crate::domain::requirement::{AbstractRequirement, KeywordRules};
    use crate::domain::types::DataQuality;
    use std::collections::BTreeSet;

    fn item(
        key: &str,
        name: &str,
        category: ProductCategory,
        sub_category: &str,
        purpose: RequirementPurpose,
        caps: Capabilities,
    ) -> SelectedItem {
        SelectedItem {
            product: CatalogProduct {
                id: 0,
                name: name.to_string(),
                brand: String::new(),
                model_number: name.to_string(),
                category,
                category_raw: category.label().to_string(),
                sub_category: sub_category.to_string(),
                price: 1000.0,
                description: String::new(),
                size_inches: None,
                power_watts: None,
                data_quality: DataQuality::Good,
                capabilities: caps,
                search_text: String::new(),
                tokens: BTreeSet::new(),
            },
            requirement: AbstractRequirement {
                key: key.to_string(),
                category,
                sub_category: sub_category.to_string(),
                quantity: 1,
                priority: 20,
                keywords: KeywordRules::default(),
                size_range: None,
                power_range: None,
                min_price: None,
                max_price: None,
                strict: false,
                purpose,
                mandatory: false,
                rationale: String::new(),
            },
            quantity: 1,
            confidence: 0.9,
        }
    }

    fn eco(ecosystem: Ecosystem) -> Capabilities {
        Capabilities {
            ecosystem: Some(ecosystem),
            ..Default::default()
        }
    }

    fn video_bar() -> SelectedItem {
        item(
            "video_bar",
            "Logitech Rally Bar",
            ProductCategory::VideoConferencing,
            "Video Bar",
            RequirementPurpose::Core,
            Capabilities {
                integrated_microphones: true,
                integrated_speakers: true,
                integrated_camera: true,
                ecosystem: Some(Logitech),
                ..Default::default()
            },
        )
    }

    fn generic(key: &str, sub_category: &str) -> SelectedItem {
        item(
            key,
            "Generic",
            ProductCategory::Audio,
            sub_category,
            RequirementPurpose::GenericAudio,
            Capabilities::default(),
        )
    }

    fn reconciler() -> CrossItemReconciler {
        CrossItemReconciler::new(&ReconcilerConfig::default())
    }

    #[test]
    fn test_integrated_device_replaces_generic_audio() {
        let items = vec![
            video_bar(),
            generic("table_microphones", "Table Microphone"),
            generic("room_speakers", "Ceiling Speaker"),
        ];
        let outcome = reconciler().reconcile(items);

        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.removed.len(), 2);
        assert!(outcome.removed[0].reason.contains("Logitech Rally Bar"));
    }

    #[test]
    fn test_protected_audio_is_kept() {
        let mut protected = generic("ceiling_microphones", "Ceiling Microphone");
        protected.requirement.strict = true;
        protected.requirement.priority = 5;
        let mut voice_lift = generic("voice_lift_microphones", "Wireless Microphone");
        voice_lift.requirement.purpose = RequirementPurpose::VoiceLift;

        let outcome = reconciler().reconcile(vec![video_bar(), protected, voice_lift]);
        assert_eq!(outcome.items.len(), 3);
        assert!(outcome.removed.is_empty());
    }

    #[test]
    fn test_no_integrated_device_keeps_everything() {
        let items = vec![generic("table_microphones", "Table Microphone")];
        let outcome = reconciler().reconcile(items.clone());
        assert_eq!(outcome.items, items);
    }

    #[test]
    fn test_vendor_controller_mismatch_flagged() {
        let tap = item(
            "vc_touch_controller",
            "Poly TC8",
            ProductCategory::ControlSystems,
            "Touch Controller",
            RequirementPurpose::Core,
            eco(Poly),
        );
        let outcome = reconciler().reconcile(vec![video_bar(), tap]);
        assert_eq!(outcome.flags.len(), 1);
        assert_eq!(outcome.flags[0].kind, FlagKind::EcosystemMismatch);
        assert_eq!(outcome.flags[0].items, vec!["vc_touch_controller", "video_bar"]);
    }

    #[test]
    fn test_crestron_control_is_compatible() {
        let crestron = item(
            "control_processor",
            "Crestron CP4N",
            ProductCategory::ControlSystems,
            "Control Processor",
            RequirementPurpose::Core,
            eco(Crestron),
        );
        let outcome = reconciler().reconcile(vec![video_bar(), crestron]);
        assert!(outcome.flags.is_empty());
    }

    #[test]
    fn test_biamp_mics_need_biamp_dsp() {
        let mics = item(
            "ceiling_microphones",
            "Biamp Parle TCM-X",
            ProductCategory::Audio,
            "Ceiling Microphone",
            RequirementPurpose::GenericAudio,
            eco(Biamp),
        );
        let dsp = item("dsp", "Shure P300", ProductCategory::Audio, "DSP", RequirementPurpose::Core, eco(Shure));
        let outcome = reconciler().reconcile(vec![dsp, mics]);
        assert_eq!(outcome.flags.len(), 1);
        assert!(outcome.flags[0].message.contains("Biamp"));
    }

    #[test]
    fn test_mixer_in_dsp_role_flagged() {
        let mixer = item(
            "dsp",
            "Yamaha MG10XU",
            ProductCategory::Audio,
            "DSP",
            RequirementPurpose::Core,
            Capabilities {
                is_mixer: true,
                ..Default::default()
            },
        );
        let outcome = reconciler().reconcile(vec![mixer]);
        assert_eq!(outcome.flags.len(), 1);
    }

    #[test]
    fn test_unusual_display_configuration() {
        let mut wall = item(
            "primary_display",
            "Samsung QM55C",
            ProductCategory::Displays,
            "Professional Display",
            RequirementPurpose::Core,
            Capabilities::default(),
        );
        wall.quantity = 5;
        wall.product.size_inches = Some(55.0);
        let mut big = wall.clone();
        big.requirement.key = "confidence_display".to_string();
        big.quantity = 1;
        big.product.size_inches = Some(98.0);

        let outcome = reconciler().reconcile(vec![wall, big]);
        let unusual: Vec<_> = outcome
            .flags
            .iter()
            .filter(|f| f.kind == FlagKind::UnusualConfiguration)
            .collect();
        assert_eq!(unusual.len(), 2);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let items = vec![
            video_bar(),
            generic("table_microphones", "Table Microphone"),
            item(
                "vc_touch_controller",
                "Poly TC8",
                ProductCategory::ControlSystems,
                "Touch Controller",
                RequirementPurpose::Core,
                eco(Poly),
            ),
        ];
        let once = reconciler().reconcile(items);
        let twice = reconciler().reconcile(once.items.clone());

        assert_eq!(once.items, twice.items);
        assert_eq!(once.flags, twice.flags);
        assert!(twice.removed.is_empty());
    }
}
