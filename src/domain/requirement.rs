// ==========================================
// AV BOQ 生成引擎 - 抽象需求
// ==========================================
// 职责: 类目级需求（尚未绑定具体产品）
// 红线: 由 BlueprintBuilder 创建,CandidateResolver 只读消费
// ==========================================

use crate::domain::types::{ProductCategory, RequirementPurpose};
use serde::{Deserialize, Serialize};

// ==========================================
// NumericRange - 数值约束区间
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// 理想值（用于规格精确度评分）
    #[serde(default)]
    pub target: Option<f64>,
}

impl NumericRange {
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            target: None,
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
            target: None,
        }
    }

    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |m| value >= m) && self.max.map_or(true, |m| value <= m)
    }
}

// ==========================================
// KeywordRules - 声明式关键词规则
// ==========================================
// 匹配均为小写子串匹配
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRules {
    /// 必须全部包含
    #[serde(default)]
    pub required: Vec<String>,
    /// 至少包含其一（为空则不检查）
    #[serde(default)]
    pub any_of: Vec<String>,
    /// 一个都不能包含
    #[serde(default)]
    pub blacklisted: Vec<String>,
}

impl KeywordRules {
    pub fn new(required: &[&str], any_of: &[&str], blacklisted: &[&str]) -> Self {
        let own = |words: &[&str]| words.iter().map(|w| w.to_lowercase()).collect::<Vec<_>>();
        Self {
            required: own(required),
            any_of: own(any_of),
            blacklisted: own(blacklisted),
        }
    }

    /// 对已小写的检索文本做匹配
    pub fn matches(&self, search_text: &str) -> bool {
        self.required.iter().all(|k| search_text.contains(k.as_str()))
            && (self.any_of.is_empty() || self.any_of.iter().any(|k| search_text.contains(k.as_str())))
            && !self.blacklisted.iter().any(|k| search_text.contains(k.as_str()))
    }

    /// 追加必含关键词（偏好只收紧）
    pub fn tighten(&mut self, extra_required: &[String]) {
        for word in extra_required {
            let word = word.trim().to_lowercase();
            if !word.is_empty() && !self.required.contains(&word) {
                self.required.push(word);
            }
        }
    }
}

// ==========================================
// AbstractRequirement - 抽象需求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractRequirement {
    /// 蓝图内唯一键（如 "primary_display"）
    pub key: String,
    pub category: ProductCategory,
    pub sub_category: String,
    pub quantity: u32,
    /// 越小越关键
    pub priority: u32,
    #[serde(default)]
    pub keywords: KeywordRules,
    #[serde(default)]
    pub size_range: Option<NumericRange>,
    #[serde(default)]
    pub power_range: Option<NumericRange>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    /// 候选必须明确属于该类目/子类目
    pub strict: bool,
    pub purpose: RequirementPurpose,
    /// 必选项（完整性评分依据）
    pub mandatory: bool,
    /// 需求说明（供理由生成服务使用）
    #[serde(default)]
    pub rationale: String,
}

impl AbstractRequirement {
    /// 收紧价格上限（只降不升）
    pub fn cap_price(&mut self, cap: f64) {
        if cap <= 0.0 || !cap.is_finite() {
            return;
        }
        self.max_price = Some(self.max_price.map_or(cap, |current| current.min(cap)));
    }

    pub fn is_microphone(&self) -> bool {
        self.sub_category.to_lowercase().contains("microphone")
    }

    pub fn is_speaker(&self) -> bool {
        self.sub_category.to_lowercase().contains("speaker")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_rules_all_any_none() {
        let rules = KeywordRules::new(&["speaker"], &["ceiling", "in-ceiling"], &["portable"]);
        assert!(rules.matches("qsc ac-c6t ceiling speaker 6.5in"));
        assert!(!rules.matches("qsc wall speaker"));
        assert!(!rules.matches("portable ceiling speaker"));
    }

    #[test]
    fn test_cap_price_only_lowers() {
        let mut req = AbstractRequirement {
            key: "k".into(),
            category: ProductCategory::Displays,
            sub_category: "Professional Display".into(),
            quantity: 1,
            priority: 1,
            keywords: KeywordRules::default(),
            size_range: None,
            power_range: None,
            min_price: Some(500.0),
            max_price: Some(4000.0),
            strict: true,
            purpose: RequirementPurpose::Core,
            mandatory: true,
            rationale: String::new(),
        };
        req.cap_price(6000.0);
        assert_eq!(req.max_price, Some(4000.0));
        req.cap_price(3000.0);
        assert_eq!(req.max_price, Some(3000.0));
    }

    #[test]
    fn test_numeric_range_contains() {
        let r = NumericRange::between(75.0, 98.0);
        assert!(r.contains(85.0));
        assert!(!r.contains(65.0));
        assert!(NumericRange::at_least(200.0).contains(1200.0));
    }
}
