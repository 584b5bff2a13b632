use crate::config::ResolverConfig;
use crate::domain::catalog::CatalogProduct;
use crate::domain::requirement::{AbstractRequirement, NumericRange};
use crate::domain::room::Preferences;
use crate::domain::types::ProductCategory;
use serde::{Deserialize, Serialize};

/// 评分明细（诊断与候选短名单展示用）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub brand: f64,
    pub price: f64,
    pub spec: f64,
    pub data_quality: f64,
    /// 加权总分 0~1
    pub total: f64,
}

/// 幸存候选的已知价格范围 [最低, 最高]
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PriceWindow {
    pub low: f64,
    pub high: f64,
}

impl PriceWindow {
    pub fn from_candidates(candidates: &[&CatalogProduct]) -> Option<PriceWindow> {
        candidates
            .iter()
            .filter(|p| p.has_price())
            .map(|p| p.price)
            .fold(None, |acc: Option<PriceWindow>, price| match acc {
                None => Some(PriceWindow { low: price, high: price }),
                Some(w) => Some(PriceWindow {
                    low: w.low.min(price),
                    high: w.high.max(price),
                }),
            })
    }
}

/// 需要跟随已选视频会议品牌的配件需求（麦克风 / 扩展 / 触控器）
fn is_ecosystem_accessory(req: &AbstractRequirement, config: &ResolverConfig) -> bool {
    matches!(
        req.category,
        ProductCategory::Audio | ProductCategory::VideoConferencing | ProductCategory::ControlSystems
    ) && {
        let sub_category = req.sub_category.to_lowercase();
        config
            .ecosystem_accessory_terms
            .iter()
            .any(|term| sub_category.contains(term.as_str()))
    }
}

/// 品牌分: 显式品牌偏好 > 会议平台偏好 > 已选视频会议品牌（软偏好）
pub(super) fn brand_score(
    product: &CatalogProduct,
    req: &AbstractRequirement,
    prefs: &Preferences,
    committed_vc_brand: Option<&str>,
    config: &ResolverConfig,
) -> f64 {
    let category = req.category;
    if let Some(brand) = prefs.preferred_brand(category) {
        return if product.brand.trim().eq_ignore_ascii_case(brand) {
            1.0
        } else {
            config.brand_mismatch_score
        };
    }

    // 会议平台偏好只作用于视频会议类目
    if category == ProductCategory::VideoConferencing {
        if let Some(platform) = prefs
            .vc_platform
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            return if product.search_text.contains(&platform.to_lowercase()) {
                1.0
            } else {
                config.brand_mismatch_score
            };
        }
    }

    if let Some(vc_brand) = committed_vc_brand.filter(|_| is_ecosystem_accessory(req, config)) {
        return if product.brand.trim().eq_ignore_ascii_case(vc_brand) {
            1.0
        } else {
            config.ecosystem_mismatch_score
        };
    }

    1.0
}

/// 价格贴近度: 目标价 = 幸存候选价格范围内的预算档位位置
pub(super) fn price_score(product: &CatalogProduct, window: Option<PriceWindow>, position: f64) -> f64 {
    if !product.has_price() {
        return 0.0;
    }
    let Some(window) = window else {
        return 0.0;
    };
    let spread = window.high - window.low;
    if spread <= f64::EPSILON {
        return 1.0;
    }
    let target = window.low + position * spread;
    (1.0 - (product.price - target).abs() / spread).clamp(0.0, 1.0)
}

fn closeness(range: &NumericRange, value: f64) -> f64 {
    let target = range
        .target
        .or(match (range.min, range.max) {
            (Some(min), Some(max)) => Some((min + max) / 2.0),
            (Some(min), None) => Some(min),
            (None, Some(max)) => Some(max),
            (None, None) => None,
        });
    match target {
        Some(t) if t > 0.0 => (1.0 - (value - t).abs() / t).clamp(0.0, 1.0),
        _ => 1.0,
    }
}

/// 规格精确度: 尺寸/功率与目标值的贴近程度,各项取平均
pub(super) fn spec_score(req: &AbstractRequirement, product: &CatalogProduct, config: &ResolverConfig) -> f64 {
    let checks = [
        (req.size_range, product.size_inches),
        (req.power_range, product.power_watts),
    ];

    let mut total = 0.0;
    let mut count = 0usize;
    for (range, value) in checks {
        let Some(range) = range else {
            continue;
        };
        total += match value {
            Some(v) => closeness(&range, v),
            None => config.missing_spec_score,
        };
        count += 1;
    }

    if count == 0 {
        1.0
    } else {
        total / count as f64
    }
}

pub(super) fn score(
    req: &AbstractRequirement,
    product: &CatalogProduct,
    prefs: &Preferences,
    committed_vc_brand: Option<&str>,
    window: Option<PriceWindow>,
    position: f64,
    config: &ResolverConfig,
) -> ScoreBreakdown {
    let w = &config.weights;
    let brand = brand_score(product, req, prefs, committed_vc_brand, config);
    let price = price_score(product, window, position);
    let spec = spec_score(req, product, config);
    let data_quality = product.data_quality.factor();
    let total = (w.brand * brand + w.price * price + w.spec * spec + w.data_quality * data_quality).clamp(0.0, 1.0);

    ScoreBreakdown {
        brand,
        price,
        spec,
        data_quality,
        total,
    }
}
