// ==========================================
// AV BOQ 生成引擎 - 领域类型定义
// ==========================================
// 职责: 封闭枚举集合 (房间原型/预算档位/产品类目/评级等)
// 红线: 类目匹配只走枚举,不走散落的字符串判断
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 房间原型 (Room Type)
// ==========================================
// 封闭集合,新原型需同步 room::RoomProfile 表
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    SmallHuddle,
    MediumHuddle,
    StandardConference,
    LargeConference,
    ExecutiveBoardroom,
    TrainingRoom,
    LargeTraining,
    MultipurposeEvent,
    ProductionStudio,
    TelepresenceSuite,
}

impl RoomType {
    pub const ALL: [RoomType; 10] = [
        RoomType::SmallHuddle,
        RoomType::MediumHuddle,
        RoomType::StandardConference,
        RoomType::LargeConference,
        RoomType::ExecutiveBoardroom,
        RoomType::TrainingRoom,
        RoomType::LargeTraining,
        RoomType::MultipurposeEvent,
        RoomType::ProductionStudio,
        RoomType::TelepresenceSuite,
    ];

    /// 展示名称 (BOQ 文档中使用)
    pub fn label(&self) -> &'static str {
        match self {
            RoomType::SmallHuddle => "Small Huddle Room",
            RoomType::MediumHuddle => "Medium Huddle Room",
            RoomType::StandardConference => "Standard Conference Room",
            RoomType::LargeConference => "Large Conference Room",
            RoomType::ExecutiveBoardroom => "Executive Boardroom",
            RoomType::TrainingRoom => "Training Room",
            RoomType::LargeTraining => "Large Training/Presentation Room",
            RoomType::MultipurposeEvent => "Multipurpose Event Room",
            RoomType::ProductionStudio => "Video Production Studio",
            RoomType::TelepresenceSuite => "Telepresence Suite",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 预算档位 (Budget Tier)
// ==========================================
// 顺序: Economy < Standard < Premium
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetTier {
    Economy,
    Standard,
    Premium,
}

impl Default for BudgetTier {
    fn default() -> Self {
        BudgetTier::Standard
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetTier::Economy => write!(f, "ECONOMY"),
            BudgetTier::Standard => write!(f, "STANDARD"),
            BudgetTier::Premium => write!(f, "PREMIUM"),
        }
    }
}

// ==========================================
// 观看任务等级 (DISCAS Viewing Task)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewingTask {
    Analytical, // ADM: 需辨识单像素细节
    Basic,      // BDM: 需阅读文字/表格
    Passive,    // PDM: 仅观看影像
}

impl fmt::Display for ViewingTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewingTask::Analytical => write!(f, "ANALYTICAL"),
            ViewingTask::Basic => write!(f, "BASIC"),
            ViewingTask::Passive => write!(f, "PASSIVE"),
        }
    }
}

// ==========================================
// 座位布局 (Seating Layout)
// ==========================================
// 决定麦克风数量按桌长还是按面积计算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatingLayout {
    ConferenceTable,
    Classroom,
    Theater,
    Flexible,
}

impl SeatingLayout {
    pub fn is_table_based(&self) -> bool {
        matches!(self, SeatingLayout::ConferenceTable)
    }
}

// ==========================================
// 房间规模档位 (Room Tier)
// ==========================================
// 由面积阈值表决定,见 engine::blueprint::TIER_TABLE
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomTier {
    Small,
    Medium,
    Large,
    Auditorium,
}

impl fmt::Display for RoomTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomTier::Small => write!(f, "SMALL"),
            RoomTier::Medium => write!(f, "MEDIUM"),
            RoomTier::Large => write!(f, "LARGE"),
            RoomTier::Auditorium => write!(f, "AUDITORIUM"),
        }
    }
}

// ==========================================
// 产品类目 (Product Category)
// ==========================================
// 目录中的类目文本在导入时映射到此枚举,无法识别的归入 Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Displays,
    Mounts,
    VideoConferencing,
    Audio,
    ControlSystems,
    SignalManagement,
    Infrastructure,
    Networking,
    CablesConnectivity,
    SoftwareServices,
    Other,
}

impl ProductCategory {
    /// 目录中使用的类目文本
    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::Displays => "Displays",
            ProductCategory::Mounts => "Mounts",
            ProductCategory::VideoConferencing => "Video Conferencing",
            ProductCategory::Audio => "Audio",
            ProductCategory::ControlSystems => "Control Systems",
            ProductCategory::SignalManagement => "Signal Management",
            ProductCategory::Infrastructure => "Infrastructure",
            ProductCategory::Networking => "Networking",
            ProductCategory::CablesConnectivity => "Cables & Connectivity",
            ProductCategory::SoftwareServices => "Software & Services",
            ProductCategory::Other => "Other",
        }
    }

    /// 解析目录类目文本（大小写/空白/常见别名容错）
    pub fn from_label(raw: &str) -> ProductCategory {
        let normalized: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "displays" | "display" | "displaysmonitors" => ProductCategory::Displays,
            "mounts" | "mount" | "mountsracks" => ProductCategory::Mounts,
            "videoconferencing" | "vc" | "video" => ProductCategory::VideoConferencing,
            "audio" | "audiosystems" => ProductCategory::Audio,
            "controlsystems" | "control" | "controlsystem" => ProductCategory::ControlSystems,
            "signalmanagement" | "switching" | "signaldistribution" => {
                ProductCategory::SignalManagement
            }
            "infrastructure" | "power" => ProductCategory::Infrastructure,
            "networking" | "network" => ProductCategory::Networking,
            "cablesconnectivity" | "cables" | "connectivity" | "cablesandconnectivity" => {
                ProductCategory::CablesConnectivity
            }
            "softwareservices" | "softwareandservices" | "services" | "software" => {
                ProductCategory::SoftwareServices
            }
            _ => ProductCategory::Other,
        }
    }

    /// 硬件类目（服务类过滤只作用于硬件类目）
    pub fn is_hardware(&self) -> bool {
        !matches!(self, ProductCategory::SoftwareServices | ProductCategory::Other)
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 数据质量等级 (Data Quality)
// ==========================================
// 导入时由 DqGrader 评定,只降低评分,不阻断选型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataQuality {
    Good,
    Fair,
    Poor,
}

impl DataQuality {
    /// 评分因子 (0~1)
    pub fn factor(&self) -> f64 {
        match self {
            DataQuality::Good => 1.0,
            DataQuality::Fair => 0.7,
            DataQuality::Poor => 0.4,
        }
    }
}

impl fmt::Display for DataQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQuality::Good => write!(f, "GOOD"),
            DataQuality::Fair => write!(f, "FAIR"),
            DataQuality::Poor => write!(f, "POOR"),
        }
    }
}

// ==========================================
// 供电回路等级 (Circuit Rating)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitRating {
    Circuit15A,
    Circuit20A,
    Multiple20A,
}

impl fmt::Display for CircuitRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitRating::Circuit15A => write!(f, "15A Standard Circuit"),
            CircuitRating::Circuit20A => write!(f, "20A Dedicated Circuit"),
            CircuitRating::Multiple20A => write!(f, "Multiple 20A Circuits"),
        }
    }
}

// ==========================================
// 需求用途 (Requirement Purpose)
// ==========================================
// 协调器据此判断哪些条目可被一体机替代
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequirementPurpose {
    Core,         // 核心设备
    GenericAudio, // 通用拾音/扩声（一体机可替代）
    VoiceLift,    // 语音扩声（大房间专用,不可替代）
    Compliance,   // 无障碍/合规
    Optional,     // 偏好追加项
}

// ==========================================
// 过滤阶段 (Filter Stage)
// ==========================================
// 顺序即执行顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterStage {
    Category,
    NonService,
    Keyword,
    Specification,
    PriceRange,
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterStage::Category => write!(f, "CATEGORY"),
            FilterStage::NonService => write!(f, "NON_SERVICE"),
            FilterStage::Keyword => write!(f, "KEYWORD"),
            FilterStage::Specification => write!(f, "SPECIFICATION"),
            FilterStage::PriceRange => write!(f, "PRICE_RANGE"),
        }
    }
}

// ==========================================
// 未满足原因码 (Reason Code)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    NoCandidate,
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonCode::NoCandidate => write!(f, "NO_CANDIDATE"),
        }
    }
}

// ==========================================
// 协调标记类型 (Flag Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagKind {
    EcosystemMismatch,
    UnusualConfiguration,
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagKind::EcosystemMismatch => write!(f, "ECOSYSTEM_MISMATCH"),
            FlagKind::UnusualConfiguration => write!(f, "UNUSUAL_CONFIGURATION"),
        }
    }
}

// ==========================================
// 质量评级 (Grade)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

// ==========================================
// 品牌生态 (Ecosystem)
// ==========================================
// 由品牌在目录加载时推导,用于兼容性表
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ecosystem {
    Cisco,
    Poly,
    Logitech,
    Yealink,
    Neat,
    Crestron,
    Extron,
    Amx,
    Biamp,
    Shure,
    Qsc,
    Sennheiser,
}

impl Ecosystem {
    /// 由品牌文本推导生态（未知品牌返回 None）
    pub fn from_brand(brand: &str) -> Option<Ecosystem> {
        let b = brand.trim().to_lowercase();
        let eco = match b.as_str() {
            "cisco" | "cisco webex" | "webex" => Ecosystem::Cisco,
            "poly" | "polycom" | "hp poly" => Ecosystem::Poly,
            "logitech" => Ecosystem::Logitech,
            "yealink" => Ecosystem::Yealink,
            "neat" => Ecosystem::Neat,
            "crestron" => Ecosystem::Crestron,
            "extron" => Ecosystem::Extron,
            "amx" | "amx by harman" => Ecosystem::Amx,
            "biamp" => Ecosystem::Biamp,
            "shure" => Ecosystem::Shure,
            "qsc" | "q-sys" => Ecosystem::Qsc,
            "sennheiser" => Ecosystem::Sennheiser,
            _ => return None,
        };
        Some(eco)
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
