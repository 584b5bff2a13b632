// ==========================================
// AV BOQ 生成引擎 - 产品目录
// ==========================================
// 职责: CatalogProduct / Capabilities / Catalog 快照 / CatalogHandle
// 红线: Catalog 加载后只读;替换目录只换 Arc,不影响进行中的生成
// ==========================================

use crate::domain::types::{DataQuality, Ecosystem, ProductCategory};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

// ==========================================
// Capabilities - 能力标记（加载时推导一次）
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// 内置麦克风阵列（视频条/一体机）
    pub integrated_microphones: bool,
    /// 内置扬声器
    pub integrated_speakers: bool,
    pub integrated_camera: bool,
    /// 服务/保修/授权类条目
    pub is_service: bool,
    /// 调音台（不能替代 DSP）
    pub is_mixer: bool,
    #[serde(default)]
    pub ecosystem: Option<Ecosystem>,
}

impl Capabilities {
    /// 一体机: 同时具备内置拾音与扩声
    pub fn is_integrated_av(&self) -> bool {
        self.integrated_microphones && self.integrated_speakers
    }
}

// ==========================================
// CatalogProduct - 目录产品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// 目录插入序号（平局裁决使用）
    pub id: usize,
    pub name: String,
    pub brand: String,
    pub model_number: String,
    pub category: ProductCategory,
    /// 目录原始类目文本
    pub category_raw: String,
    pub sub_category: String,
    /// 单价 (USD),0 表示缺失
    pub price: f64,
    pub description: String,
    pub size_inches: Option<f64>,
    pub power_watts: Option<f64>,
    pub data_quality: DataQuality,
    pub capabilities: Capabilities,

    /// 小写检索文本（名称/品牌/型号/子类目/描述）
    #[serde(skip)]
    pub search_text: String,
    #[serde(skip)]
    pub tokens: BTreeSet<String>,
}

impl CatalogProduct {
    /// 重建检索文本与分词（加载后调用一次）
    pub fn index_text(&mut self) {
        self.search_text = format!(
            "{} {} {} {} {}",
            self.name, self.brand, self.model_number, self.sub_category, self.description
        )
        .to_lowercase();
        self.tokens = self
            .search_text
            .split(|c: char| !c.is_ascii_alphanumeric() && c != '-')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
    }

    pub fn sub_category_matches(&self, sub_category: &str) -> bool {
        self.sub_category.trim().eq_ignore_ascii_case(sub_category.trim())
    }

    pub fn has_price(&self) -> bool {
        self.price > 0.0
    }
}

// ==========================================
// Catalog - 不可变目录快照
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    version: String,
    products: Vec<CatalogProduct>,
    by_category: BTreeMap<ProductCategory, Vec<usize>>,
}

impl Catalog {
    /// 以插入顺序重新编号并建立类目索引
    pub fn new(version: impl Into<String>, products: Vec<CatalogProduct>) -> Self {
        let mut by_category: BTreeMap<ProductCategory, Vec<usize>> = BTreeMap::new();
        let products: Vec<CatalogProduct> = products
            .into_iter()
            .enumerate()
            .map(|(idx, mut p)| {
                p.id = idx;
                if p.search_text.is_empty() {
                    p.index_text();
                }
                by_category.entry(p.category).or_default().push(idx);
                p
            })
            .collect();

        Self {
            version: version.into(),
            products,
            by_category,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    pub fn get(&self, id: usize) -> Option<&CatalogProduct> {
        self.products.get(id)
    }

    /// 按类目取产品（保持目录顺序）
    pub fn in_category(&self, category: ProductCategory) -> impl Iterator<Item = &CatalogProduct> {
        self.by_category
            .get(&category)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.products.get(*id))
    }

    /// 去掉某一类目后的新快照（测试与诊断用）
    pub fn without_category(&self, category: ProductCategory) -> Catalog {
        let kept = self
            .products
            .iter()
            .filter(|p| p.category != category)
            .cloned()
            .collect();
        Catalog::new(format!("{}-without-{:?}", self.version, category), kept)
    }
}

// ==========================================
// CatalogHandle - 可替换的目录引用
// ==========================================
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// 获取当前快照（锁中毒时仍返回内部值）
    pub fn snapshot(&self) -> Arc<Catalog> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// 原子替换目录,返回旧快照
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }
}

// ==========================================
// 导入中间结构
// ==========================================

/// 字段映射后的原始产品行（尚未清洗）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProductRecord {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model_number: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub size: Option<String>,
    pub power: Option<String>,
    /// 源文件行号（表头为第 1 行）
    pub row_number: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row_number: usize,
    pub reason: String,
}

/// 目录加载报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogLoadReport {
    pub catalog_version: String,
    pub total_rows: usize,
    pub loaded: usize,
    pub skipped: Vec<SkippedRow>,
    pub quality_counts: BTreeMap<DataQuality, usize>,
    /// 类目无法识别而归入 Other 的行数
    pub uncategorized: usize,
    pub elapsed_ms: u64,
}
