// ==========================================
// AV BOQ 生成引擎 - 能力标记推导
// ==========================================
// 阶段 4: 基于关键词的启发式能力识别
// 红线: 每个产品在目录加载时推导一次,生成期间不再扫描文本
// ==========================================

use crate::domain::catalog::Capabilities;
use crate::domain::types::{Ecosystem, ProductCategory};

/// 一体化视频条/会议一体机的产品族关键词
const INTEGRATED_DEVICE_KEYWORDS: &[&str] = &[
    "video bar",
    "videobar",
    "collaboration bar",
    "all-in-one",
    "all in one",
    "rally bar",
    "meetup",
    "studio x",
    "room bar",
    "neat bar",
    "uvc40",
];

const INTEGRATED_MIC_KEYWORDS: &[&str] = &[
    "built-in mic",
    "built-in microphone",
    "integrated mic",
    "integrated microphone",
    "beamforming",
    "microphone array",
    "mic array",
];

const INTEGRATED_SPEAKER_KEYWORDS: &[&str] = &[
    "built-in speaker",
    "integrated speaker",
    "built-in audio",
    "integrated audio",
];

const INTEGRATED_CAMERA_KEYWORDS: &[&str] = &["camera", "webcam"];

/// 名称/子类目中出现即视为服务条目（整词匹配）
const SERVICE_NAME_TOKENS: &[&str] = &[
    "support",
    "service",
    "services",
    "warranty",
    "contract",
    "care",
    "premier",
    "agreement",
    "jumpstart",
    "subscription",
    "license",
    "licence",
    "maintenance",
    "installation",
];

/// 描述中出现即视为服务条目的短语
const SERVICE_DESCRIPTION_PHRASES: &[&str] = &[
    "extended warranty",
    "support contract",
    "service agreement",
    "care pack",
    "carepack",
    "maintenance plan",
    "subscription term",
];

const MIXER_KEYWORDS: &[&str] = &["mixer", "mixing console"];

/// 推导输入（清洗后字段）
#[derive(Debug, Clone, Copy)]
pub struct CapabilityInput<'a> {
    pub name: &'a str,
    pub brand: &'a str,
    pub category: ProductCategory,
    pub sub_category: &'a str,
    pub description: &'a str,
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn has_token(text: &str, tokens: &[&str]) -> bool {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .any(|t| tokens.contains(&t))
}

/// 推导产品能力标记
pub fn derive_capabilities(input: &CapabilityInput<'_>) -> Capabilities {
    let name = input.name.to_lowercase();
    let sub_category = input.sub_category.to_lowercase();
    let description = input.description.to_lowercase();
    let text = format!("{} {} {}", name, sub_category, description);

    let is_service = input.category == ProductCategory::SoftwareServices
        || has_token(&name, SERVICE_NAME_TOKENS)
        || has_token(&sub_category, SERVICE_NAME_TOKENS)
        || contains_any(&description, SERVICE_DESCRIPTION_PHRASES);

    // 一体机只在视频会议类目中识别
    let integrated_family = input.category == ProductCategory::VideoConferencing
        && contains_any(&format!("{} {}", name, sub_category), INTEGRATED_DEVICE_KEYWORDS);

    let integrated_microphones = !is_service
        && (integrated_family
            || (input.category == ProductCategory::VideoConferencing
                && contains_any(&text, INTEGRATED_MIC_KEYWORDS)));
    let integrated_speakers = !is_service
        && (integrated_family
            || (input.category == ProductCategory::VideoConferencing
                && contains_any(&text, INTEGRATED_SPEAKER_KEYWORDS)));
    let integrated_camera = !is_service
        && input.category == ProductCategory::VideoConferencing
        && (integrated_family || contains_any(&text, INTEGRATED_CAMERA_KEYWORDS));

    let is_mixer = input.category == ProductCategory::Audio && contains_any(&text, MIXER_KEYWORDS);

    let ecosystem = Ecosystem::from_brand(input.brand).or_else(|| {
        if text.contains("q-sys") {
            Some(Ecosystem::Qsc)
        } else {
            None
        }
    });

    Capabilities {
        integrated_microphones,
        integrated_speakers,
        integrated_camera,
        is_service,
        is_mixer,
        ecosystem,
    }
}
