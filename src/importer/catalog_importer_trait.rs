// ==========================================
// AV BOQ 生成引擎 - 目录导入 Trait
// ==========================================
// 职责: 定义目录导入各阶段接口（不包含实现）
// 流程: 解析 → 映射 → 清洗 → DQ 分级 → 能力推导 → 快照
// ==========================================

use crate::domain::catalog::RawProductRecord;
use crate::domain::types::DataQuality;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（HashMap<列名, 值>）
    ///
    /// # 返回
    /// - Ok(Vec<HashMap<String, String>>): 行记录列表（已跳过全空行）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: CatalogFieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行记录映射为 RawProductRecord（列名别名容错）
    fn map_to_raw_product(&self, row: &HashMap<String, String>, row_number: usize) -> RawProductRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 2）
// 实现者: CatalogDataCleaner
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM + 空白压缩）
    fn clean_text(&self, value: &str) -> String;

    /// 标准化 NULL 值（空白/N/A/-/null → None）
    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// 解析价格（"$1,299.00" / "1299" / "USD 1299"）
    fn parse_price(&self, value: &str) -> Option<f64>;

    /// 解析尺寸（英寸）: 65 / 65" / 65-inch / 65in
    fn parse_size_inches(&self, value: &str) -> Option<f64>;

    /// 解析功耗（瓦）: 310 / 310W / 310 watts
    fn parse_power_watts(&self, value: &str) -> Option<f64>;
}

// ==========================================
// DqGrader Trait
// ==========================================
// 用途: 数据质量分级接口（阶段 3）
// 实现者: CatalogDqGrader
pub trait DqGrader: Send + Sync {
    /// 评定一行产品数据的质量等级,返回等级与问题列表
    fn grade(&self, input: &DqInput<'_>) -> (DataQuality, Vec<String>);
}

/// DQ 分级输入（清洗后的关键字段）
#[derive(Debug, Clone, Copy)]
pub struct DqInput<'a> {
    pub name: &'a str,
    pub brand: &'a str,
    pub model_number: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub category_recognized: bool,
    pub expects_size: bool,
    pub size_inches: Option<f64>,
    pub power_watts: Option<f64>,
}
