// ==========================================
// AV BOQ 生成引擎 - 数据清洗器实现
// ==========================================
// 阶段 2: TRIM / NULL 标准化 / 价格、尺寸、功耗解析
// ==========================================

use crate::importer::catalog_importer_trait::DataCleaner;

// 视为空值的占位文本
const NULL_TOKENS: &[&str] = &["n/a", "na", "-", "--", "null", "none", "tbd", "nan"];

pub struct CatalogDataCleaner;

impl CatalogDataCleaner {
    /// 取文本中第一个数值（支持千分位逗号与小数点）
    fn leading_number(value: &str) -> Option<f64> {
        let mut digits = String::new();
        let mut started = false;

        for c in value.chars() {
            if c.is_ascii_digit() || (c == '.' && started) {
                digits.push(c);
                started = true;
            } else if c == ',' && started {
                continue;
            } else if started {
                break;
            }
        }

        digits.trim_end_matches('.').parse::<f64>().ok()
    }
}

impl DataCleaner for CatalogDataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = self.clean_text(&v);
            if trimmed.is_empty() || NULL_TOKENS.contains(&trimmed.to_lowercase().as_str()) {
                None
            } else {
                Some(trimmed)
            }
        })
    }

    fn parse_price(&self, value: &str) -> Option<f64> {
        Self::leading_number(value).filter(|p| p.is_finite() && *p >= 0.0)
    }

    fn parse_size_inches(&self, value: &str) -> Option<f64> {
        let size = Self::leading_number(value)?;
        // 合理的显示/设备尺寸范围
        if (10.0..=300.0).contains(&size) {
            Some(size)
        } else {
            None
        }
    }

    fn parse_power_watts(&self, value: &str) -> Option<f64> {
        let watts = Self::leading_number(value)?;
        let lower = value.to_lowercase();
        let watts = if lower.contains("kw") { watts * 1000.0 } else { watts };
        if watts > 0.0 && watts.is_finite() {
            Some(watts)
        } else {
            None
        }
    }
}
