// ==========================================
// AV BOQ 生成引擎 - 目录加载器
// ==========================================
// 职责: 整合导入流程,从文件到不可变 Catalog 快照
// 流程: 解析 → 映射 → 清洗 → DQ 分级 → 能力推导 → 快照
// 红线: 行级数据缺陷只降级或跳过,不整体失败
// ==========================================

use crate::domain::catalog::{Catalog, CatalogLoadReport, CatalogProduct, SkippedRow};
use crate::domain::types::ProductCategory;
use crate::importer::capability::{derive_capabilities, CapabilityInput};
use crate::importer::catalog_importer_trait::{DataCleaner, DqGrader, DqInput, FieldMapper, FileParser};
use crate::importer::data_cleaner::CatalogDataCleaner;
use crate::importer::dq_validator::CatalogDqGrader;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::CatalogFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

// 必需的标准字段
const REQUIRED_FIELDS: &[&str] = &["name", "category"];

// ==========================================
// CatalogLoader - 目录加载器
// ==========================================
pub struct CatalogLoader {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
    dq_grader: Box<dyn DqGrader>,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(CatalogFieldMapper),
            Box::new(CatalogDataCleaner),
            Box::new(CatalogDqGrader::default()),
        )
    }
}

impl CatalogLoader {
    /// 创建新的 CatalogLoader 实例
    pub fn new(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleaner>,
        dq_grader: Box<dyn DqGrader>,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
            data_cleaner,
            dq_grader,
        }
    }

    /// 从 CSV / Excel 文件加载目录
    #[instrument(skip(self, file_path), fields(path = %file_path.display()))]
    pub fn load_file(&self, file_path: &Path) -> ImportResult<(Catalog, CatalogLoadReport)> {
        info!("开始加载产品目录");
        let rows = self.file_parser.parse_to_raw_records(file_path)?;

        let source_name = file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("catalog")
            .to_string();
        self.load_rows(&rows, &source_name)
    }

    /// 从已解析的行记录构建目录快照
    pub fn load_rows(
        &self,
        rows: &[HashMap<String, String>],
        source_name: &str,
    ) -> ImportResult<(Catalog, CatalogLoadReport)> {
        let started = Instant::now();

        if rows.is_empty() {
            return Err(ImportError::EmptyCatalog(source_name.to_string()));
        }

        // 必需列检查（取所有行列名并集）
        let headers: Vec<String> = rows
            .iter()
            .flat_map(|r| r.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        for field in REQUIRED_FIELDS {
            if !CatalogFieldMapper.has_field(&headers, field) {
                return Err(ImportError::MissingColumn(field.to_string()));
            }
        }

        let mut report = CatalogLoadReport {
            total_rows: rows.len(),
            ..Default::default()
        };
        let mut products = Vec::with_capacity(rows.len());

        for (idx, row) in rows.iter().enumerate() {
            // 表头为第 1 行
            let row_number = idx + 2;
            match self.build_product(row, row_number) {
                Ok((product, recognized)) => {
                    if !recognized {
                        report.uncategorized += 1;
                    }
                    *report.quality_counts.entry(product.data_quality).or_insert(0) += 1;
                    products.push(product);
                }
                Err(reason) => {
                    debug!(row_number, reason = %reason, "跳过目录行");
                    report.skipped.push(SkippedRow { row_number, reason });
                }
            }
        }

        if products.is_empty() {
            return Err(ImportError::EmptyCatalog(format!(
                "{}: 全部 {} 行均被跳过",
                source_name,
                rows.len()
            )));
        }

        let version = catalog_version(source_name, &products);
        report.catalog_version = version.clone();
        report.loaded = products.len();
        report.elapsed_ms = started.elapsed().as_millis() as u64;

        if !report.skipped.is_empty() {
            warn!(skipped = report.skipped.len(), "部分目录行缺少名称或类目,已跳过");
        }
        info!(
            version = %version,
            loaded = report.loaded,
            skipped = report.skipped.len(),
            uncategorized = report.uncategorized,
            elapsed_ms = report.elapsed_ms,
            "产品目录加载完成"
        );

        Ok((Catalog::new(version, products), report))
    }

    /// 单行: 映射 → 清洗 → 分级 → 能力推导
    ///
    /// 返回 (产品, 类目是否识别); Err 为跳过原因
    fn build_product(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> Result<(CatalogProduct, bool), String> {
        let raw = self.field_mapper.map_to_raw_product(row, row_number);
        let clean = |v: Option<String>| self.data_cleaner.normalize_null(v);

        let name = clean(raw.name).ok_or_else(|| "名称缺失".to_string())?;
        let category_raw = clean(raw.category).ok_or_else(|| "类目缺失".to_string())?;

        let category = ProductCategory::from_label(&category_raw);
        let recognized = category != ProductCategory::Other
            || category_raw.trim().eq_ignore_ascii_case("other");

        let brand = clean(raw.brand).unwrap_or_default();
        let model_number = clean(raw.model_number).unwrap_or_default();
        let sub_category = clean(raw.sub_category).unwrap_or_else(|| category.label().to_string());
        let description = clean(raw.description).unwrap_or_default();
        let price = clean(raw.price)
            .and_then(|p| self.data_cleaner.parse_price(&p))
            .unwrap_or(0.0);
        let size_inches = clean(raw.size).and_then(|s| self.data_cleaner.parse_size_inches(&s));
        let power_watts = clean(raw.power).and_then(|p| self.data_cleaner.parse_power_watts(&p));

        let (data_quality, issues) = self.dq_grader.grade(&DqInput {
            name: &name,
            brand: &brand,
            model_number: &model_number,
            description: &description,
            price,
            category_recognized: recognized,
            expects_size: category == ProductCategory::Displays,
            size_inches,
            power_watts,
        });
        if !issues.is_empty() {
            debug!(row_number, quality = %data_quality, issues = ?issues, "目录行数据质量问题");
        }

        let capabilities = derive_capabilities(&CapabilityInput {
            name: &name,
            brand: &brand,
            category,
            sub_category: &sub_category,
            description: &description,
        });

        let mut product = CatalogProduct {
            id: 0,
            name,
            brand,
            model_number,
            category,
            category_raw,
            sub_category,
            price,
            description,
            size_inches,
            power_watts,
            data_quality,
            capabilities,
            search_text: String::new(),
            tokens: BTreeSet::new(),
        };
        product.index_text();

        Ok((product, recognized))
    }
}

/// 目录版本号: 来源名 + 条目数 + 内容摘要（同内容同版本）
fn catalog_version(source_name: &str, products: &[CatalogProduct]) -> String {
    let mut hasher = DefaultHasher::new();
    for p in products {
        p.name.hash(&mut hasher);
        p.brand.hash(&mut hasher);
        p.model_number.hash(&mut hasher);
        p.category.hash(&mut hasher);
        p.price.to_bits().hash(&mut hasher);
    }
    format!("{}-{}-{:016x}", source_name, products.len(), hasher.finish())
}
