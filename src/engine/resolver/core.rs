use super::filters::{by_category, by_keywords, by_price, by_specification, non_service};
use super::scoring::{score, PriceWindow, ScoreBreakdown};
use crate::config::EngineConfig;
use crate::domain::boq::{SelectedItem, UnresolvedRequirement};
use crate::domain::catalog::{Catalog, CatalogProduct};
use crate::domain::requirement::AbstractRequirement;
use crate::domain::room::{Preferences, RoomSpecification};
use crate::domain::types::{BudgetTier, FilterStage, ProductCategory, ReasonCode};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// 带评分的候选
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub product: &'a CatalogProduct,
    pub breakdown: ScoreBreakdown,
}

// ==========================================
// CandidateResolver - 候选解析器
// ==========================================
// 每个房间一个实例（偏好与预算档位随房间变化）
pub struct CandidateResolver {
    preferences: Preferences,
    budget_tier: BudgetTier,
    config: Arc<EngineConfig>,
}

impl CandidateResolver {
    pub fn new(preferences: &Preferences, budget_tier: BudgetTier, config: Arc<EngineConfig>) -> Self {
        Self {
            preferences: preferences.clone(),
            budget_tier,
            config,
        }
    }

    pub fn for_room(room: &RoomSpecification, config: Arc<EngineConfig>) -> Self {
        Self::new(&room.preferences, room.budget_tier, config)
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 为单个需求选型
    ///
    /// # 返回
    /// - Ok(SelectedItem): 评分最高的候选,数量取需求数量
    /// - Err(UnresolvedRequirement): 无候选,附最后淘汰阶段
    pub fn resolve(
        &self,
        req: &AbstractRequirement,
        catalog: &Catalog,
    ) -> Result<SelectedItem, UnresolvedRequirement> {
        self.resolve_with_committed(req, catalog, &[])
    }

    /// 在已选条目的上下文中选型
    ///
    /// 麦克风/扩展/触控器类配件优先跟随已选视频会议设备的品牌（软偏好）
    pub fn resolve_with_committed(
        &self,
        req: &AbstractRequirement,
        catalog: &Catalog,
        committed: &[SelectedItem],
    ) -> Result<SelectedItem, UnresolvedRequirement> {
        let ranked = self.rank(req, catalog, committed_vc_brand(committed))?;
        // rank 保证非空
        let best = ranked.into_iter().next().ok_or_else(|| UnresolvedRequirement {
            requirement: req.clone(),
            reason: ReasonCode::NoCandidate,
            eliminated_at: FilterStage::PriceRange,
        })?;

        debug!(
            key = %req.key,
            model = %best.product.model_number,
            brand = %best.product.brand,
            score = best.breakdown.total,
            "需求选型完成"
        );

        Ok(SelectedItem {
            product: best.product.clone(),
            requirement: req.clone(),
            quantity: req.quantity,
            confidence: best.breakdown.total,
        })
    }

    /// 批量选型（保持需求顺序,后选需求可见先选条目）
    pub fn resolve_all(
        &self,
        requirements: &[AbstractRequirement],
        catalog: &Catalog,
    ) -> (Vec<SelectedItem>, Vec<UnresolvedRequirement>) {
        let mut items = Vec::with_capacity(requirements.len());
        let mut unresolved = Vec::new();
        for req in requirements {
            match self.resolve_with_committed(req, catalog, &items) {
                Ok(item) => items.push(item),
                Err(miss) => {
                    debug!(key = %req.key, stage = %miss.eliminated_at, "需求无候选");
                    unresolved.push(miss);
                }
            }
        }
        (items, unresolved)
    }

    /// 评分前 n 名候选（无候选时为空）
    pub fn shortlist<'a>(&self, req: &AbstractRequirement, catalog: &'a Catalog, n: usize) -> Vec<ScoredCandidate<'a>> {
        match self.rank(req, catalog, None) {
            Ok(mut ranked) => {
                ranked.truncate(n);
                ranked
            }
            Err(_) => Vec::new(),
        }
    }

    /// 按配置长度 (resolver.shortlist_size) 取短名单
    pub fn default_shortlist<'a>(&self, req: &AbstractRequirement, catalog: &'a Catalog) -> Vec<ScoredCandidate<'a>> {
        self.shortlist(req, catalog, self.config.resolver.shortlist_size)
    }

    /// 通过全部 5 个过滤阶段的候选（目录顺序）
    ///
    /// Err 为淘汰最后一个候选的阶段
    pub fn survivors<'a>(
        &self,
        req: &AbstractRequirement,
        catalog: &'a Catalog,
    ) -> Result<Vec<&'a CatalogProduct>, FilterStage> {
        let cfg = &self.config.resolver;

        let candidates = by_category(req, catalog);
        if candidates.is_empty() {
            return Err(FilterStage::Category);
        }
        let candidates = non_service(req, candidates, cfg);
        if candidates.is_empty() {
            return Err(FilterStage::NonService);
        }
        let candidates = by_keywords(req, candidates);
        if candidates.is_empty() {
            return Err(FilterStage::Keyword);
        }
        let candidates = by_specification(req, candidates);
        if candidates.is_empty() {
            return Err(FilterStage::Specification);
        }
        let candidates = by_price(req, candidates, cfg);
        if candidates.is_empty() {
            return Err(FilterStage::PriceRange);
        }
        Ok(candidates)
    }

    // ==========================================
    // 评分排序
    // ==========================================

    fn rank<'a>(
        &self,
        req: &AbstractRequirement,
        catalog: &'a Catalog,
        committed_vc_brand: Option<&str>,
    ) -> Result<Vec<ScoredCandidate<'a>>, UnresolvedRequirement> {
        let survivors = self.survivors(req, catalog).map_err(|stage| UnresolvedRequirement {
            requirement: req.clone(),
            reason: ReasonCode::NoCandidate,
            eliminated_at: stage,
        })?;

        let window = PriceWindow::from_candidates(&survivors);
        let position = self.config.price_position(self.budget_tier);
        let mut ranked: Vec<ScoredCandidate<'a>> = survivors
            .into_iter()
            .map(|product| ScoredCandidate {
                product,
                breakdown: score(
                    req,
                    product,
                    &self.preferences,
                    committed_vc_brand,
                    window,
                    position,
                    &self.config.resolver,
                ),
            })
            .collect();

        ranked.sort_by(compare_candidates);
        Ok(ranked)
    }
}

/// 已选条目中首个视频会议设备的品牌
fn committed_vc_brand(committed: &[SelectedItem]) -> Option<&str> {
    committed
        .iter()
        .find(|i| i.product.category == ProductCategory::VideoConferencing && !i.product.capabilities.is_service)
        .map(|i| i.product.brand.trim())
        .filter(|b| !b.is_empty())
}

/// 排序键: 总分降序 → 价格升序 → 目录顺序
fn compare_candidates(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    b.breakdown
        .total
        .partial_cmp(&a.breakdown.total)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.product.price.partial_cmp(&b.product.price).unwrap_or(Ordering::Equal))
        .then_with(|| a.product.id.cmp(&b.product.id))
}
