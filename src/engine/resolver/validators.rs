// ==========================================
// 类目校验表（strict 需求额外应用）
// ==========================================
// 防止配件/线材混入主设备类目（如 "85in Display Mount" 落在 Displays 下）
// ==========================================

use crate::domain::catalog::CatalogProduct;
use crate::domain::types::ProductCategory;

/// 类目级校验记录
#[derive(Debug, Clone, Copy)]
pub struct CategoryValidator {
    pub category: ProductCategory,
    /// 检索文本至少包含其一（为空不检查）
    pub must_mention_any: &'static [&'static str],
    /// 出现任一整词即拒绝
    pub reject_tokens: &'static [&'static str],
}

impl CategoryValidator {
    pub fn accepts(&self, product: &CatalogProduct) -> bool {
        let mentioned = self.must_mention_any.is_empty()
            || self
                .must_mention_any
                .iter()
                .any(|w| product.search_text.contains(w));
        mentioned && !self.reject_tokens.iter().any(|t| product.tokens.contains(*t))
    }
}

pub static CATEGORY_VALIDATORS: &[CategoryValidator] = &[
    CategoryValidator {
        category: ProductCategory::Displays,
        must_mention_any: &["display", "monitor", "screen", "lcd", "led", "oled", "tv"],
        reject_tokens: &["mount", "bracket", "cable", "adapter", "stand", "cart", "remote"],
    },
    CategoryValidator {
        category: ProductCategory::VideoConferencing,
        must_mention_any: &[],
        reject_tokens: &["mount", "bracket", "cable", "adapter", "license", "shelf"],
    },
    CategoryValidator {
        category: ProductCategory::Audio,
        must_mention_any: &[],
        reject_tokens: &["mount", "bracket", "cable", "adapter", "grille", "windscreen"],
    },
    CategoryValidator {
        category: ProductCategory::ControlSystems,
        must_mention_any: &[],
        reject_tokens: &["mount", "bracket", "cable", "license"],
    },
];

pub fn validator_for(category: ProductCategory) -> Option<&'static CategoryValidator> {
    CATEGORY_VALIDATORS.iter().find(|v| v.category == category)
}
