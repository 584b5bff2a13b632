use super::*;
use crate::config::EngineConfig;
use crate::domain::catalog::{Capabilities, Catalog, CatalogProduct};
use crate::domain::requirement::{AbstractRequirement, KeywordRules, NumericRange};
use crate::domain::room::Preferences;
use crate::domain::types::{BudgetTier, DataQuality, FilterStage, ProductCategory, ReasonCode, RequirementPurpose};
use std::collections::BTreeSet;
use std::sync::Arc;

// ==========================================
// 测试辅助函数
// ==========================================

fn product(name: &str, brand: &str, category: ProductCategory, sub_category: &str, price: f64) -> CatalogProduct {
    CatalogProduct {
        id: 0,
        name: name.to_string(),
        brand: brand.to_string(),
        model_number: name.replace(' ', "-"),
        category,
        category_raw: category.label().to_string(),
        sub_category: sub_category.to_string(),
        price,
        description: String::new(),
        size_inches: None,
        power_watts: None,
        data_quality: DataQuality::Good,
        capabilities: Capabilities::default(),
        search_text: String::new(),
        tokens: BTreeSet::new(),
    }
}

fn display(name: &str, brand: &str, size: f64, price: f64) -> CatalogProduct {
    let mut p = product(name, brand, ProductCategory::Displays, "Professional Display", price);
    p.size_inches = Some(size);
    p
}

fn requirement(key: &str, category: ProductCategory, sub_category: &str, strict: bool) -> AbstractRequirement {
    AbstractRequirement {
        key: key.to_string(),
        category,
        sub_category: sub_category.to_string(),
        quantity: 1,
        priority: 1,
        keywords: KeywordRules::default(),
        size_range: None,
        power_range: None,
        min_price: None,
        max_price: None,
        strict,
        purpose: RequirementPurpose::Core,
        mandatory: true,
        rationale: String::new(),
    }
}

fn display_requirement() -> AbstractRequirement {
    let mut req = requirement("primary_display", ProductCategory::Displays, "Professional Display", true);
    req.size_range = Some(NumericRange::between(85.0, 98.0).with_target(85.0));
    req
}

fn resolver(prefs: Preferences, tier: BudgetTier) -> CandidateResolver {
    CandidateResolver::new(&prefs, tier, Arc::new(EngineConfig::default()))
}

fn default_resolver() -> CandidateResolver {
    resolver(Preferences::default(), BudgetTier::Standard)
}

// ==========================================
// 过滤阶段
// ==========================================

#[test]
fn test_strict_requirement_needs_exact_sub_category() {
    let catalog = Catalog::new(
        "t",
        vec![product("Shure MXA920", "Shure", ProductCategory::Audio, "Ceiling Microphone", 4500.0)],
    );
    let req = requirement("dsp", ProductCategory::Audio, "DSP", true);

    let miss = default_resolver().resolve(&req, &catalog).unwrap_err();
    assert_eq!(miss.reason, ReasonCode::NoCandidate);
    assert_eq!(miss.eliminated_at, FilterStage::Category);
}

#[test]
fn test_non_strict_falls_back_to_whole_category() {
    let catalog = Catalog::new(
        "t",
        vec![product("Chief XTM1U", "Chief", ProductCategory::Mounts, "Wall Mount", 450.0)],
    );
    let req = requirement("display_mount", ProductCategory::Mounts, "Display Mount", false);

    let item = default_resolver().resolve(&req, &catalog).unwrap();
    assert_eq!(item.product.name, "Chief XTM1U");
}

#[test]
fn test_service_items_removed_for_hardware() {
    let mut warranty = product("Rally Bar Extended Warranty", "Logitech", ProductCategory::VideoConferencing, "Video Bar", 400.0);
    warranty.capabilities.is_service = true;
    let catalog = Catalog::new("t", vec![warranty]);
    let req = requirement("video_bar", ProductCategory::VideoConferencing, "Video Bar", true);

    let miss = default_resolver().resolve(&req, &catalog).unwrap_err();
    assert_eq!(miss.eliminated_at, FilterStage::NonService);
}

#[test]
fn test_zero_price_display_hits_hardware_floor() {
    let catalog = Catalog::new("t", vec![display("Samsung QM85C", "Samsung", 85.0, 0.0)]);
    let miss = default_resolver().resolve(&display_requirement(), &catalog).unwrap_err();
    assert_eq!(miss.eliminated_at, FilterStage::NonService);
}

#[test]
fn test_zero_price_survives_outside_floor_categories() {
    let catalog = Catalog::new(
        "t",
        vec![product("Crown CDi 4|300", "Crown", ProductCategory::Audio, "Amplifier", 0.0)],
    );
    let req = requirement("amplifier", ProductCategory::Audio, "Amplifier", false);

    let item = default_resolver().resolve(&req, &catalog).unwrap();
    // 品牌 0.35 + 价格 0 + 规格 0.25 + 数据质量 0.15
    assert!((item.confidence - 0.75).abs() < 1e-9);
}

#[test]
fn test_keyword_blacklist_eliminates() {
    let catalog = Catalog::new(
        "t",
        vec![product("Yamaha MG10XU Mixer", "Yamaha", ProductCategory::Audio, "DSP", 300.0)],
    );
    let mut req = requirement("dsp", ProductCategory::Audio, "DSP", true);
    req.keywords = KeywordRules::new(&[], &[], &["mixer"]);

    let miss = default_resolver().resolve(&req, &catalog).unwrap_err();
    assert_eq!(miss.eliminated_at, FilterStage::Keyword);
}

#[test]
fn test_category_validator_rejects_accessories_for_strict() {
    let catalog = Catalog::new(
        "t",
        vec![display("85in Display Mount Bracket", "Chief", 85.0, 400.0)],
    );
    let miss = default_resolver().resolve(&display_requirement(), &catalog).unwrap_err();
    assert_eq!(miss.eliminated_at, FilterStage::Keyword);
}

#[test]
fn test_size_out_of_range_eliminated_but_missing_size_survives() {
    let small = display("Samsung QM55C", "Samsung", 55.0, 1500.0);
    let catalog = Catalog::new("t", vec![small.clone()]);
    let miss = default_resolver().resolve(&display_requirement(), &catalog).unwrap_err();
    assert_eq!(miss.eliminated_at, FilterStage::Specification);

    let mut unknown = small;
    unknown.size_inches = None;
    let catalog = Catalog::new("t", vec![unknown]);
    let item = default_resolver().resolve(&display_requirement(), &catalog).unwrap();
    assert!(item.confidence < 1.0);
}

#[test]
fn test_price_cap_eliminates_expensive_candidates() {
    let catalog = Catalog::new("t", vec![display("Samsung QM85C", "Samsung", 85.0, 4200.0)]);
    let mut req = display_requirement();
    req.cap_price(3000.0);

    let miss = default_resolver().resolve(&req, &catalog).unwrap_err();
    assert_eq!(miss.eliminated_at, FilterStage::PriceRange);
}

// ==========================================
// 评分与裁决
// ==========================================

#[test]
fn test_brand_preference_wins() {
    let catalog = Catalog::new(
        "t",
        vec![
            display("Samsung QM85C", "Samsung", 85.0, 4000.0),
            display("LG 86UH5J", "LG", 85.0, 4000.0),
        ],
    );
    let mut prefs = Preferences::default();
    prefs.brands.insert(ProductCategory::Displays, "LG".to_string());

    let item = resolver(prefs, BudgetTier::Standard)
        .resolve(&display_requirement(), &catalog)
        .unwrap();
    assert_eq!(item.product.brand, "LG");
}

#[test]
fn test_vc_platform_counts_as_brand_signal() {
    let mut teams = product("Yealink MeetingBar A30 Teams", "Yealink", ProductCategory::VideoConferencing, "Video Bar", 2500.0);
    teams.description = "Certified for Microsoft Teams Rooms".to_string();
    let zoom = product("Poly Studio X52 Zoom", "Poly", ProductCategory::VideoConferencing, "Video Bar", 2500.0);
    let catalog = Catalog::new("t", vec![zoom, teams]);

    let mut prefs = Preferences::default();
    prefs.vc_platform = Some("Teams".to_string());
    let req = requirement("video_bar", ProductCategory::VideoConferencing, "Video Bar", true);

    let item = resolver(prefs, BudgetTier::Standard).resolve(&req, &catalog).unwrap();
    assert_eq!(item.product.brand, "Yealink");
}

#[test]
fn test_budget_tier_moves_selection_up_the_price_range() {
    let catalog = Catalog::new(
        "t",
        vec![
            display("Display A", "Acme", 85.0, 2000.0),
            display("Display B", "Acme", 85.0, 3000.0),
            display("Display C", "Acme", 85.0, 4000.0),
            display("Display D", "Acme", 85.0, 5000.0),
            display("Display E", "Acme", 85.0, 6000.0),
        ],
    );
    let req = display_requirement();
    let price_for = |tier| {
        resolver(Preferences::default(), tier)
            .resolve(&req, &catalog)
            .unwrap()
            .product
            .price
    };

    let economy = price_for(BudgetTier::Economy);
    let standard = price_for(BudgetTier::Standard);
    let premium = price_for(BudgetTier::Premium);
    assert_eq!(economy, 3000.0);
    assert_eq!(standard, 4000.0);
    assert_eq!(premium, 5000.0);
}

#[test]
fn test_ties_break_by_catalog_order() {
    let catalog = Catalog::new(
        "t",
        vec![
            display("First", "Acme", 85.0, 4000.0),
            display("Second", "Acme", 85.0, 4000.0),
        ],
    );
    let item = default_resolver().resolve(&display_requirement(), &catalog).unwrap();
    assert_eq!(item.product.name, "First");
    assert_eq!(item.product.id, 0);
}

#[test]
fn test_shortlist_is_ranked_and_truncated() {
    let catalog = Catalog::new(
        "t",
        vec![
            display("A", "Acme", 98.0, 9000.0),
            display("B", "Acme", 85.0, 4000.0),
            display("C", "Acme", 85.0, 4500.0),
        ],
    );
    let resolver = default_resolver();
    let list = resolver.shortlist(&display_requirement(), &catalog, 2);

    assert_eq!(list.len(), 2);
    assert!(list[0].breakdown.total >= list[1].breakdown.total);

    let survivors = resolver.survivors(&display_requirement(), &catalog).unwrap();
    assert_eq!(survivors.len(), 3);
}

#[test]
fn test_resolve_all_splits_items_and_unresolved() {
    let catalog = Catalog::new("t", vec![display("Samsung QM85C", "Samsung", 85.0, 4200.0)]);
    let reqs = vec![
        display_requirement(),
        requirement("dsp", ProductCategory::Audio, "DSP", true),
    ];
    let (items, unresolved) = default_resolver().resolve_all(&reqs, &catalog);
    assert_eq!(items.len(), 1);
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].requirement.key, "dsp");
}

#[test]
fn test_default_shortlist_uses_configured_size() {
    let products = (0..7)
        .map(|i| display(&format!("Display {}", i), "Acme", 85.0, 3000.0 + 100.0 * f64::from(i)))
        .collect();
    let catalog = Catalog::new("t", products);

    let list = default_resolver().default_shortlist(&display_requirement(), &catalog);
    assert_eq!(list.len(), EngineConfig::default().resolver.shortlist_size);
}

// ==========================================
// 已选视频会议品牌的生态软偏好
// ==========================================

fn controller_catalog() -> Catalog {
    Catalog::new(
        "t",
        vec![
            product("Logitech Rally Bar", "Logitech", ProductCategory::VideoConferencing, "Video Bar", 3999.0),
            product("Poly TC8", "Poly", ProductCategory::ControlSystems, "Touch Controller", 1000.0),
            product("Logitech Tap", "Logitech", ProductCategory::ControlSystems, "Touch Controller", 1300.0),
            product("Yealink CTP18", "Yealink", ProductCategory::ControlSystems, "Touch Controller", 700.0),
        ],
    )
}

#[test]
fn test_touch_controller_follows_committed_video_bar() {
    let catalog = controller_catalog();
    let controller = requirement("vc_touch_controller", ProductCategory::ControlSystems, "Touch Controller", false);

    // 无上下文时按价格贴近度选 Poly
    let alone = default_resolver().resolve(&controller, &catalog).unwrap();
    assert_eq!(alone.product.brand, "Poly");

    let bar = requirement("video_bar", ProductCategory::VideoConferencing, "Video Bar", true);
    let (items, unresolved) = default_resolver().resolve_all(&[bar, controller], &catalog);
    assert!(unresolved.is_empty());
    assert_eq!(items[0].product.brand, "Logitech");
    assert_eq!(items[1].product.name, "Logitech Tap");
}

#[test]
fn test_explicit_brand_preference_beats_committed_ecosystem() {
    let catalog = controller_catalog();
    let mut prefs = Preferences::default();
    prefs.brands.insert(ProductCategory::ControlSystems, "Yealink".to_string());

    let bar = requirement("video_bar", ProductCategory::VideoConferencing, "Video Bar", true);
    let controller = requirement("vc_touch_controller", ProductCategory::ControlSystems, "Touch Controller", false);
    let (items, _) = resolver(prefs, BudgetTier::Standard).resolve_all(&[bar, controller], &catalog);
    assert_eq!(items[1].product.brand, "Yealink");
}

#[test]
fn test_ecosystem_preference_ignores_unrelated_requirements() {
    let catalog = Catalog::new(
        "t",
        vec![
            product("Logitech Rally Bar", "Logitech", ProductCategory::VideoConferencing, "Video Bar", 3999.0),
            display("Samsung QM85C", "Samsung", 85.0, 4000.0),
        ],
    );
    let bar = requirement("video_bar", ProductCategory::VideoConferencing, "Video Bar", true);
    let committed = vec![default_resolver().resolve(&bar, &catalog).unwrap()];

    let chosen = default_resolver()
        .resolve_with_committed(&display_requirement(), &catalog, &committed)
        .unwrap();
    let alone = default_resolver().resolve(&display_requirement(), &catalog).unwrap();
    assert_eq!(chosen.confidence, alone.confidence);
}
