// ==========================================
// AV BOQ 生成引擎 - 蓝图构建器
// ==========================================
// 职责: 房间档位 + 工程目标值 + 偏好 → 有序抽象需求列表
// 档位 → 需求模板映射为数据表 (TIER_TABLE),新增档位只改表
// 红线: 偏好只收紧或追加低优先级可选项,不删除必选项
// ==========================================

use crate::config::EngineConfig;
use crate::domain::requirement::{AbstractRequirement, KeywordRules, NumericRange};
use crate::domain::room::RoomSpecification;
use crate::domain::targets::EngineeringTargets;
use crate::domain::types::{ProductCategory, RequirementPurpose, RoomTier};
use std::sync::Arc;
use tracing::debug;

use ProductCategory::*;
use RequirementPurpose::*;

// ==========================================
// 模板规则
// ==========================================

/// 数量规则（对工程目标值求值）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityRule {
    Fixed(u32),
    DisplayCount,
    /// 显示数量 + 固定值
    DisplaysPlus(u32),
    SpeakerCount,
    MicrophoneCount,
}

impl QuantityRule {
    fn evaluate(&self, targets: &EngineeringTargets) -> u32 {
        let qty = match self {
            QuantityRule::Fixed(n) => *n,
            QuantityRule::DisplayCount => targets.display_count,
            QuantityRule::DisplaysPlus(n) => targets.display_count + n,
            QuantityRule::SpeakerCount => targets.speaker_count,
            QuantityRule::MicrophoneCount => targets.microphone_count,
        };
        qty.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeRule {
    None,
    /// [推荐尺寸, 推荐尺寸 + 上浮]
    RecommendedDisplay,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerRule {
    None,
    /// 输出功率 ≥ 扬声器数 x 单只功率
    PerSpeaker(f64),
}

/// 需求模板（静态数据）
#[derive(Debug, Clone, Copy)]
pub struct RequirementTemplate {
    pub key: &'static str,
    pub category: ProductCategory,
    pub sub_category: &'static str,
    pub quantity: QuantityRule,
    pub priority: u32,
    pub strict: bool,
    pub purpose: RequirementPurpose,
    pub mandatory: bool,
    pub required: &'static [&'static str],
    pub any_of: &'static [&'static str],
    pub blacklisted: &'static [&'static str],
    pub size: SizeRule,
    pub power: PowerRule,
    pub rationale: &'static str,
}

impl RequirementTemplate {
    const fn new(
        key: &'static str,
        category: ProductCategory,
        sub_category: &'static str,
        quantity: QuantityRule,
        priority: u32,
    ) -> Self {
        Self {
            key,
            category,
            sub_category,
            quantity,
            priority,
            strict: false,
            purpose: Core,
            mandatory: true,
            required: &[],
            any_of: &[],
            blacklisted: &[],
            size: SizeRule::None,
            power: PowerRule::None,
            rationale: "",
        }
    }

    const fn strict(self) -> Self {
        Self { strict: true, ..self }
    }

    const fn optional(self) -> Self {
        Self { mandatory: false, ..self }
    }

    const fn purpose(self, purpose: RequirementPurpose) -> Self {
        Self { purpose, ..self }
    }

    const fn any_of(self, any_of: &'static [&'static str]) -> Self {
        Self { any_of, ..self }
    }

    const fn required(self, required: &'static [&'static str]) -> Self {
        Self { required, ..self }
    }

    const fn blacklisted(self, blacklisted: &'static [&'static str]) -> Self {
        Self { blacklisted, ..self }
    }

    const fn size(self, size: SizeRule) -> Self {
        Self { size, ..self }
    }

    const fn power(self, power: PowerRule) -> Self {
        Self { power, ..self }
    }

    const fn rationale(self, rationale: &'static str) -> Self {
        Self { rationale, ..self }
    }

    fn instantiate(&self, targets: &EngineeringTargets, config: &EngineConfig) -> AbstractRequirement {
        let size_range = match self.size {
            SizeRule::None => None,
            SizeRule::RecommendedDisplay => {
                let recommended = f64::from(targets.recommended_display_in);
                Some(
                    NumericRange::between(recommended, recommended + config.display.size_headroom_in)
                        .with_target(recommended),
                )
            }
        };
        let power_range = match self.power {
            PowerRule::None => None,
            PowerRule::PerSpeaker(watts) => {
                let needed = f64::from(targets.speaker_count) * watts;
                Some(NumericRange::at_least(needed).with_target(needed))
            }
        };

        AbstractRequirement {
            key: self.key.to_string(),
            category: self.category,
            sub_category: self.sub_category.to_string(),
            quantity: self.quantity.evaluate(targets),
            priority: self.priority,
            keywords: KeywordRules::new(self.required, self.any_of, self.blacklisted),
            size_range,
            power_range,
            min_price: None,
            max_price: None,
            strict: self.strict,
            purpose: self.purpose,
            mandatory: self.mandatory,
            rationale: self.rationale.to_string(),
        }
    }
}

// ==========================================
// 模板分组
// ==========================================

const DISPLAY_GROUP: &[RequirementTemplate] = &[
    RequirementTemplate::new("primary_display", Displays, "Professional Display", QuantityRule::DisplayCount, 1)
        .strict()
        .blacklisted(&["mount", "bracket", "cart", "projector screen"])
        .size(SizeRule::RecommendedDisplay)
        .rationale("Primary display sized from the farthest viewer distance"),
    RequirementTemplate::new("display_mount", Mounts, "Display Mount", QuantityRule::DisplayCount, 9)
        .any_of(&["mount", "bracket", "cart", "stand"])
        .blacklisted(&["camera", "speaker", "projector"])
        .rationale("One mount per display"),
];

const HUDDLE_VIDEO_GROUP: &[RequirementTemplate] = &[
    RequirementTemplate::new("video_bar", VideoConferencing, "Video Bar", QuantityRule::Fixed(1), 2)
        .strict()
        .rationale("All-in-one video bar with integrated camera, microphones and speakers"),
    RequirementTemplate::new("vc_touch_controller", ControlSystems, "Touch Controller", QuantityRule::Fixed(1), 8)
        .optional()
        .any_of(&["touch", "controller", "tap", "tc8", "tc10"])
        .rationale("Meeting-room touch controller for one-touch join"),
];

const GENERIC_AUDIO_GROUP: &[RequirementTemplate] = &[
    RequirementTemplate::new("table_microphones", Audio, "Table Microphone", QuantityRule::MicrophoneCount, 20)
        .optional()
        .purpose(GenericAudio)
        .any_of(&["microphone", "mic"])
        .blacklisted(&["wireless", "handheld", "lavalier"])
        .rationale("Table microphones sized from table length"),
    RequirementTemplate::new("room_speakers", Audio, "Ceiling Speaker", QuantityRule::SpeakerCount, 20)
        .optional()
        .purpose(GenericAudio)
        .any_of(&["speaker"])
        .rationale("Room speakers sized from ceiling coverage"),
];

const ROOM_VIDEO_GROUP: &[RequirementTemplate] = &[
    RequirementTemplate::new("vc_codec", VideoConferencing, "Video Codec", QuantityRule::Fixed(1), 2)
        .strict()
        .any_of(&["codec", "room kit", "room system", "compute", "g7500", "studio"])
        .blacklisted(&["video bar", "webcam"])
        .rationale("Room codec driving separate camera and audio chain"),
    RequirementTemplate::new("ptz_camera", VideoConferencing, "PTZ Camera", QuantityRule::Fixed(1), 4)
        .strict()
        .any_of(&["ptz", "camera"])
        .blacklisted(&["webcam", "document camera"])
        .rationale("PTZ camera for full-room framing"),
];

const ROOM_AUDIO_GROUP: &[RequirementTemplate] = &[
    RequirementTemplate::new("dsp", Audio, "DSP", QuantityRule::Fixed(1), 3)
        .strict()
        .any_of(&["dsp", "processor", "tesira", "core", "p300", "intellimix"])
        .blacklisted(&["mixer", "mixing console"])
        .rationale("DSP with acoustic echo cancellation for the room audio chain"),
    RequirementTemplate::new("ceiling_microphones", Audio, "Ceiling Microphone", QuantityRule::MicrophoneCount, 6)
        .strict()
        .any_of(&["microphone", "mic", "array"])
        .blacklisted(&["wireless", "handheld", "lavalier"])
        .rationale("Ceiling microphones covering the seating area"),
    RequirementTemplate::new("ceiling_speakers", Audio, "Ceiling Speaker", QuantityRule::SpeakerCount, 6)
        .strict()
        .any_of(&["speaker"])
        .blacklisted(&["subwoofer", "portable"])
        .rationale("Ceiling speakers for even coverage"),
    RequirementTemplate::new("amplifier", Audio, "Amplifier", QuantityRule::Fixed(1), 7)
        .any_of(&["amplifier", "amp"])
        .power(PowerRule::PerSpeaker(30.0))
        .rationale("Amplifier sized for the speaker count"),
];

const CONTROL_GROUP: &[RequirementTemplate] = &[
    RequirementTemplate::new("control_processor", ControlSystems, "Control Processor", QuantityRule::Fixed(1), 8)
        .any_of(&["processor", "controller", "control system"])
        .blacklisted(&["audio", "dsp"])
        .rationale("Central control processor"),
    RequirementTemplate::new("touch_panel", ControlSystems, "Touch Panel", QuantityRule::Fixed(1), 8)
        .any_of(&["touch", "panel"])
        .blacklisted(&["scheduling", "booking"])
        .rationale("Room control touch panel"),
];

const SIGNAL_GROUP: &[RequirementTemplate] = &[
    RequirementTemplate::new("presentation_switcher", SignalManagement, "Presentation Switcher", QuantityRule::Fixed(1), 10)
        .any_of(&["switcher", "switch", "matrix", "scaler"])
        .rationale("Presentation switcher for local sources"),
];

const CONNECTIVITY_GROUP: &[RequirementTemplate] = &[
    RequirementTemplate::new("table_connectivity", CablesConnectivity, "Table Connectivity", QuantityRule::Fixed(1), 12)
        .any_of(&["table", "cubby", "box", "flip", "cable retractor"])
        .rationale("Table connectivity box for guest laptops"),
    RequirementTemplate::new("hdmi_cables", CablesConnectivity, "AV Cable", QuantityRule::DisplaysPlus(1), 14)
        .required(&["hdmi"])
        .rationale("HDMI cabling for displays and table input"),
];

const NETWORK_GROUP: &[RequirementTemplate] = &[
    RequirementTemplate::new("network_switch", Networking, "Network Switch", QuantityRule::Fixed(1), 11)
        .any_of(&["switch"])
        .blacklisted(&["kvm", "hdmi"])
        .rationale("Managed PoE switch for the AV VLAN"),
];

const RACK_POWER_GROUP: &[RequirementTemplate] = &[
    RequirementTemplate::new("equipment_rack", Infrastructure, "Equipment Rack", QuantityRule::Fixed(1), 13)
        .any_of(&["rack", "enclosure", "credenza"])
        .rationale("Equipment rack for head-end devices"),
    RequirementTemplate::new("power_distribution", Infrastructure, "Power Distribution", QuantityRule::Fixed(1), 13)
        .any_of(&["pdu", "power", "sequencer"])
        .rationale("Rack power distribution"),
];

const AUDITORIUM_GROUP: &[RequirementTemplate] = &[
    RequirementTemplate::new("voice_lift_microphones", Audio, "Wireless Microphone", QuantityRule::Fixed(2), 5)
        .strict()
        .purpose(VoiceLift)
        .any_of(&["wireless", "handheld", "lavalier", "beltpack"])
        .rationale("Presenter microphones for voice lift in a large space"),
    RequirementTemplate::new("audience_camera", VideoConferencing, "PTZ Camera", QuantityRule::Fixed(1), 9)
        .optional()
        .any_of(&["ptz", "camera"])
        .blacklisted(&["webcam", "document camera"])
        .rationale("Second camera covering the audience"),
];

// ==========================================
// 可选/合规追加模板
// ==========================================

const WIRELESS_PRESENTATION: RequirementTemplate =
    RequirementTemplate::new("wireless_presentation", SignalManagement, "Wireless Presentation", QuantityRule::Fixed(1), 30)
        .optional()
        .purpose(Optional)
        .any_of(&["wireless presentation", "clickshare", "airmedia", "wireless", "solstice"])
        .rationale("Wireless presentation gateway requested");

const SCHEDULING_PANEL: RequirementTemplate =
    RequirementTemplate::new("scheduling_panel", ControlSystems, "Scheduling Panel", QuantityRule::Fixed(1), 31)
        .optional()
        .purpose(Optional)
        .any_of(&["scheduling", "booking", "room panel"])
        .rationale("Room scheduling panel requested");

const VOICE_REINFORCEMENT: RequirementTemplate =
    RequirementTemplate::new("voice_reinforcement", Audio, "Wireless Microphone", QuantityRule::Fixed(1), 32)
        .strict()
        .optional()
        .purpose(VoiceLift)
        .any_of(&["wireless", "handheld", "lavalier", "beltpack"])
        .rationale("Presenter microphone for voice reinforcement");

const TRACKING_CAMERA: RequirementTemplate =
    RequirementTemplate::new("tracking_camera", VideoConferencing, "PTZ Camera", QuantityRule::Fixed(1), 33)
        .optional()
        .purpose(Optional)
        .any_of(&["tracking", "auto-framing", "autoframing"])
        .rationale("Auto-tracking camera requested");

const RECORDER: RequirementTemplate =
    RequirementTemplate::new("recorder", SignalManagement, "Recorder", QuantityRule::Fixed(1), 34)
        .optional()
        .purpose(Optional)
        .any_of(&["recorder", "recording", "capture"])
        .rationale("Recording/streaming appliance requested");

const ASSISTIVE_LISTENING: RequirementTemplate =
    RequirementTemplate::new("assistive_listening", Audio, "Assistive Listening", QuantityRule::Fixed(1), 15)
        .strict()
        .purpose(Compliance)
        .any_of(&["assistive listening", "listen", "ir system", "rf system"])
        .rationale("ADA assistive listening system");

const HEARING_LOOP: RequirementTemplate =
    RequirementTemplate::new("hearing_loop", Audio, "Hearing Loop", QuantityRule::Fixed(1), 16)
        .strict()
        .purpose(Compliance)
        .any_of(&["hearing loop", "induction loop", "loop driver"])
        .rationale("Induction hearing loop for hearing-aid users");

// ==========================================
// TIER_TABLE - 档位 → 模板分组
// ==========================================

pub struct TierRow {
    pub tier: RoomTier,
    pub groups: &'static [&'static [RequirementTemplate]],
}

pub static TIER_TABLE: &[TierRow] = &[
    TierRow {
        tier: RoomTier::Small,
        groups: &[DISPLAY_GROUP, HUDDLE_VIDEO_GROUP, GENERIC_AUDIO_GROUP, CONNECTIVITY_GROUP, NETWORK_GROUP],
    },
    TierRow {
        tier: RoomTier::Medium,
        groups: &[
            DISPLAY_GROUP,
            HUDDLE_VIDEO_GROUP,
            GENERIC_AUDIO_GROUP,
            SIGNAL_GROUP,
            CONNECTIVITY_GROUP,
            NETWORK_GROUP,
        ],
    },
    TierRow {
        tier: RoomTier::Large,
        groups: &[
            DISPLAY_GROUP,
            ROOM_VIDEO_GROUP,
            ROOM_AUDIO_GROUP,
            CONTROL_GROUP,
            SIGNAL_GROUP,
            CONNECTIVITY_GROUP,
            NETWORK_GROUP,
            RACK_POWER_GROUP,
        ],
    },
    TierRow {
        tier: RoomTier::Auditorium,
        groups: &[
            DISPLAY_GROUP,
            ROOM_VIDEO_GROUP,
            ROOM_AUDIO_GROUP,
            AUDITORIUM_GROUP,
            CONTROL_GROUP,
            SIGNAL_GROUP,
            CONNECTIVITY_GROUP,
            NETWORK_GROUP,
            RACK_POWER_GROUP,
        ],
    },
];

/// 取档位模板（按表顺序展开）
pub fn templates_for(tier: RoomTier) -> impl Iterator<Item = &'static RequirementTemplate> {
    TIER_TABLE
        .iter()
        .filter(move |row| row.tier == tier)
        .flat_map(|row| row.groups.iter())
        .flat_map(|group| group.iter())
}

// ==========================================
// BlueprintBuilder - 蓝图构建器
// ==========================================
pub struct BlueprintBuilder {
    config: Arc<EngineConfig>,
}

impl BlueprintBuilder {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// 构建有序需求列表（按 priority, key 升序）
    pub fn build(&self, room: &RoomSpecification, targets: &EngineeringTargets) -> Vec<AbstractRequirement> {
        let mut requirements: Vec<AbstractRequirement> = templates_for(targets.room_tier)
            .map(|t| t.instantiate(targets, &self.config))
            .collect();

        // 偏好/合规追加项
        for template in self.add_ons(room, targets) {
            if !requirements.iter().any(|r| r.key == template.key) {
                requirements.push(template.instantiate(targets, &self.config));
            }
        }

        // 偏好只收紧
        let prefs = &room.preferences;
        for req in requirements.iter_mut() {
            if let Some(extra) = prefs.extra_keywords.get(&req.category) {
                req.keywords.tighten(extra);
            }
            if let Some(cap) = prefs.price_caps.get(&req.category) {
                req.cap_price(*cap);
            }
        }

        requirements.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.key.cmp(&b.key)));

        debug!(
            tier = %targets.room_tier,
            count = requirements.len(),
            keys = ?requirements.iter().map(|r| r.key.as_str()).collect::<Vec<_>>(),
            "蓝图构建完成"
        );
        requirements
    }

    fn add_ons(&self, room: &RoomSpecification, targets: &EngineeringTargets) -> Vec<&'static RequirementTemplate> {
        let features = &room.preferences.features;
        let compliance = &room.preferences.compliance;
        let thresholds = &self.config.compliance;
        let mut add_ons = Vec::new();

        if features.wireless_presentation {
            add_ons.push(&WIRELESS_PRESENTATION);
        }
        if features.room_scheduling {
            add_ons.push(&SCHEDULING_PANEL);
        }
        // 大空间已包含语音扩声
        if features.voice_reinforcement && targets.room_tier != RoomTier::Auditorium {
            add_ons.push(&VOICE_REINFORCEMENT);
        }
        if features.auto_tracking_camera {
            add_ons.push(&TRACKING_CAMERA);
        }
        if features.recording {
            add_ons.push(&RECORDER);
        }
        if compliance.accessibility || room.capacity > thresholds.assistive_listening_capacity {
            add_ons.push(&ASSISTIVE_LISTENING);
        }
        if compliance.hearing_loop || room.capacity > thresholds.hearing_loop_capacity {
            add_ons.push(&HEARING_LOOP);
        }

        add_ons
    }
}
