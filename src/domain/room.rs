// ==========================================
// AV BOQ 生成引擎 - 房间规格与偏好
// ==========================================
// 职责: RoomSpecification / Preferences / 房间原型档案表
// 红线: RoomSpecification 创建后不可变,每次生成请求创建一次
// ==========================================

use crate::domain::types::{BudgetTier, ProductCategory, RoomType, SeatingLayout, ViewingTask};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// RoomSpecification - 房间规格
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSpecification {
    /// 长 (ft)
    pub length_ft: f64,
    /// 宽 (ft)
    pub width_ft: f64,
    /// 吊顶高度 (ft)
    pub ceiling_height_ft: f64,
    pub room_type: RoomType,
    /// 容纳人数
    pub capacity: u32,
    #[serde(default)]
    pub budget_tier: BudgetTier,
    #[serde(default)]
    pub preferences: Preferences,

    // ===== 可选覆写（缺省取房间原型档案） =====
    #[serde(default)]
    pub viewing_task: Option<ViewingTask>,
    /// 最小文字元素占画面高度比例（BDM 用,默认 0.04）
    #[serde(default)]
    pub element_height_pct: Option<f64>,
    #[serde(default)]
    pub table_length_ft: Option<f64>,
    #[serde(default)]
    pub seating_layout: Option<SeatingLayout>,
}

impl RoomSpecification {
    /// 以默认偏好创建房间规格
    pub fn new(
        length_ft: f64,
        width_ft: f64,
        ceiling_height_ft: f64,
        room_type: RoomType,
        capacity: u32,
        budget_tier: BudgetTier,
    ) -> Self {
        Self {
            length_ft,
            width_ft,
            ceiling_height_ft,
            room_type,
            capacity,
            budget_tier,
            preferences: Preferences::default(),
            viewing_task: None,
            element_height_pct: None,
            table_length_ft: None,
            seating_layout: None,
        }
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_viewing_task(mut self, task: ViewingTask, element_height_pct: Option<f64>) -> Self {
        self.viewing_task = Some(task);
        self.element_height_pct = element_height_pct;
        self
    }

    /// 面积 (sq ft)
    pub fn area_sqft(&self) -> f64 {
        self.length_ft * self.width_ft
    }

    pub fn profile(&self) -> RoomProfile {
        RoomProfile::for_room_type(self.room_type)
    }

    pub fn effective_viewing_task(&self) -> ViewingTask {
        self.viewing_task
            .unwrap_or_else(|| self.profile().default_viewing_task)
    }

    pub fn effective_seating_layout(&self) -> SeatingLayout {
        self.seating_layout
            .unwrap_or_else(|| self.profile().seating_layout)
    }

    /// 桌长: 覆写值优先,其次原型档案,但不超过房间长边
    pub fn effective_table_length_ft(&self) -> f64 {
        let longest = self.length_ft.max(self.width_ft);
        self.table_length_ft
            .unwrap_or_else(|| self.profile().table_length_ft)
            .min(longest)
    }
}

// ==========================================
// Preferences - 结构化偏好
// ==========================================
// 自由文本偏好抽取不在本引擎内,这里只接收结构化结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// 类目 → 偏好品牌
    #[serde(default)]
    pub brands: BTreeMap<ProductCategory, String>,
    /// 会议平台 (Teams / Zoom / Webex ...)
    #[serde(default)]
    pub vc_platform: Option<String>,
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub compliance: ComplianceFlags,
    /// 类目 → 追加必含关键词（只收紧）
    #[serde(default)]
    pub extra_keywords: BTreeMap<ProductCategory, Vec<String>>,
    /// 类目 → 单价上限（只收紧）
    #[serde(default)]
    pub price_caps: BTreeMap<ProductCategory, f64>,
}

impl Preferences {
    /// 获取类目偏好品牌（"No Preference" 视为无偏好）
    pub fn preferred_brand(&self, category: ProductCategory) -> Option<&str> {
        self.brands
            .get(&category)
            .map(|b| b.trim())
            .filter(|b| !b.is_empty() && !b.eq_ignore_ascii_case("no preference"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default)]
    pub dual_display: bool,
    #[serde(default)]
    pub wireless_presentation: bool,
    #[serde(default)]
    pub room_scheduling: bool,
    #[serde(default)]
    pub voice_reinforcement: bool,
    #[serde(default)]
    pub auto_tracking_camera: bool,
    #[serde(default)]
    pub recording: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceFlags {
    /// 无障碍 (ADA)
    #[serde(default)]
    pub accessibility: bool,
    #[serde(default)]
    pub hearing_loop: bool,
}

// ==========================================
// RoomProfile - 房间原型档案
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomProfile {
    /// 原型典型容纳人数区间（超出时给出核对建议）
    pub capacity_min: u32,
    pub capacity_max: u32,
    pub table_length_ft: f64,
    pub seating_layout: SeatingLayout,
    pub display_count: u32,
    /// 语音清晰度优先（扬声器覆盖面积需缩减）
    pub speech_critical: bool,
    pub default_viewing_task: ViewingTask,
}

impl RoomProfile {
    pub fn for_room_type(room_type: RoomType) -> RoomProfile {
        use SeatingLayout::*;
        use ViewingTask::*;

        let (capacity_min, capacity_max, table_length_ft, seating_layout, display_count, speech_critical, task) =
            match room_type {
                RoomType::SmallHuddle => (2, 3, 4.0, ConferenceTable, 1, true, Basic),
                RoomType::MediumHuddle => (4, 6, 6.0, ConferenceTable, 1, true, Basic),
                RoomType::StandardConference => (6, 8, 10.0, ConferenceTable, 1, true, Basic),
                RoomType::LargeConference => (8, 12, 16.0, ConferenceTable, 1, true, Basic),
                RoomType::ExecutiveBoardroom => (10, 16, 20.0, ConferenceTable, 2, true, Basic),
                RoomType::TrainingRoom => (15, 25, 10.0, Classroom, 2, true, Basic),
                RoomType::LargeTraining => (25, 40, 12.0, Theater, 2, true, Basic),
                RoomType::MultipurposeEvent => (40, 100, 16.0, Flexible, 2, false, Passive),
                RoomType::ProductionStudio => (3, 10, 12.0, Flexible, 1, false, Basic),
                RoomType::TelepresenceSuite => (6, 12, 14.0, ConferenceTable, 2, true, Basic),
            };

        RoomProfile {
            capacity_min,
            capacity_max,
            table_length_ft,
            seating_layout,
            display_count,
            speech_critical,
            default_viewing_task: task,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_brand_ignores_no_preference() {
        let mut prefs = Preferences::default();
        prefs
            .brands
            .insert(ProductCategory::Displays, "No Preference".to_string());
        prefs
            .brands
            .insert(ProductCategory::Audio, " Shure ".to_string());

        assert_eq!(prefs.preferred_brand(ProductCategory::Displays), None);
        assert_eq!(prefs.preferred_brand(ProductCategory::Audio), Some("Shure"));
        assert_eq!(prefs.preferred_brand(ProductCategory::Mounts), None);
    }

    #[test]
    fn test_table_length_capped_by_room() {
        let room = RoomSpecification::new(12.0, 10.0, 9.0, RoomType::ExecutiveBoardroom, 10, BudgetTier::Standard);
        // 原型桌长 20ft,房间长边只有 12ft
        assert_eq!(room.effective_table_length_ft(), 12.0);
    }

    #[test]
    fn test_room_spec_json_defaults() {
        let json = r#"{
            "length_ft": 28.0,
            "width_ft": 20.0,
            "ceiling_height_ft": 10.0,
            "room_type": "STANDARD_CONFERENCE",
            "capacity": 8
        }"#;
        let room: RoomSpecification = serde_json::from_str(json).unwrap();
        assert_eq!(room.budget_tier, BudgetTier::Standard);
        assert_eq!(room.effective_viewing_task(), ViewingTask::Basic);
        assert!(room.preferences.brands.is_empty());
    }
}
