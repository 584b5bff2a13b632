use super::validators::validator_for;
use crate::config::ResolverConfig;
use crate::domain::catalog::{Catalog, CatalogProduct};
use crate::domain::requirement::AbstractRequirement;

/// 阶段 1: 类目
///
/// strict: 子类目必须精确匹配;
/// 非 strict: 类目内存在子类目匹配则只取匹配项,否则取整个类目
pub(super) fn by_category<'a>(req: &AbstractRequirement, catalog: &'a Catalog) -> Vec<&'a CatalogProduct> {
    let in_category: Vec<&CatalogProduct> = catalog.in_category(req.category).collect();
    let matching: Vec<&CatalogProduct> = in_category
        .iter()
        .copied()
        .filter(|p| p.sub_category_matches(&req.sub_category))
        .collect();

    if req.strict || !matching.is_empty() {
        matching
    } else {
        in_category
    }
}

/// 阶段 2: 非服务
///
/// 硬件需求排除服务/保修/授权条目;价格下限类目再排除低于下限的条目
pub(super) fn non_service<'a>(
    req: &AbstractRequirement,
    candidates: Vec<&'a CatalogProduct>,
    config: &ResolverConfig,
) -> Vec<&'a CatalogProduct> {
    if !req.category.is_hardware() {
        return candidates;
    }
    let apply_floor = config.price_floor_categories.contains(&req.category);
    candidates
        .into_iter()
        .filter(|p| !p.capabilities.is_service)
        .filter(|p| !apply_floor || p.price >= config.hardware_price_floor)
        .collect()
}

/// 阶段 3: 关键词（strict 同时应用类目校验表）
pub(super) fn by_keywords<'a>(req: &AbstractRequirement, candidates: Vec<&'a CatalogProduct>) -> Vec<&'a CatalogProduct> {
    let validator = if req.strict { validator_for(req.category) } else { None };
    candidates
        .into_iter()
        .filter(|p| req.keywords.matches(&p.search_text))
        .filter(|p| validator.map_or(true, |v| v.accepts(p)))
        .collect()
}

/// 阶段 4: 规格区间（缺失规格不淘汰,评分时降分）
pub(super) fn by_specification<'a>(
    req: &AbstractRequirement,
    candidates: Vec<&'a CatalogProduct>,
) -> Vec<&'a CatalogProduct> {
    candidates
        .into_iter()
        .filter(|p| match (req.size_range, p.size_inches) {
            (Some(range), Some(size)) => range.contains(size),
            _ => true,
        })
        .filter(|p| match (req.power_range, p.power_watts) {
            (Some(range), Some(watts)) => range.contains(watts),
            _ => true,
        })
        .collect()
}

/// 有效价格区间: 需求上下限优先,缺省取类目默认区间
pub(super) fn price_bounds(req: &AbstractRequirement, config: &ResolverConfig) -> (f64, f64) {
    let band = config.category_price_bands.get(&req.category);
    let min = req.min_price.or(band.map(|b| b.min)).unwrap_or(0.0);
    let max = match (req.max_price, band.map(|b| b.max)) {
        (Some(cap), Some(band_max)) => cap.min(band_max),
        (Some(cap), None) => cap,
        (None, Some(band_max)) => band_max,
        (None, None) => f64::INFINITY,
    };
    (min, max)
}

/// 阶段 5: 价格区间（价格缺失的条目保留,评分时价格项为 0）
pub(super) fn by_price<'a>(
    req: &AbstractRequirement,
    candidates: Vec<&'a CatalogProduct>,
    config: &ResolverConfig,
) -> Vec<&'a CatalogProduct> {
    let (min, max) = price_bounds(req, config);
    candidates
        .into_iter()
        .filter(|p| !p.has_price() || (p.price >= min && p.price <= max))
        .collect()
}
