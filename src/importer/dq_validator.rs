// ==========================================
// AV BOQ 生成引擎 - 数据质量分级器实现
// ==========================================
// 阶段 3: 每行产品评定 Good / Fair / Poor
// 红线: 只降级,不阻断加载
// ==========================================

use crate::domain::types::DataQuality;
use crate::importer::catalog_importer_trait::{DqGrader, DqInput};

pub struct CatalogDqGrader {
    /// 描述文本少于该长度视为过短
    min_description_len: usize,
}

impl CatalogDqGrader {
    pub fn new(min_description_len: usize) -> Self {
        Self { min_description_len }
    }
}

impl Default for CatalogDqGrader {
    fn default() -> Self {
        Self::new(20)
    }
}

impl DqGrader for CatalogDqGrader {
    fn grade(&self, input: &DqInput<'_>) -> (DataQuality, Vec<String>) {
        // 严重问题直接 Poor,一般问题累计两项以上 Poor
        let mut severe = Vec::new();
        let mut minor = Vec::new();

        if input.price <= 0.0 {
            severe.push("价格缺失或为 0".to_string());
        }
        if !input.category_recognized {
            severe.push("类目无法识别".to_string());
        }

        if input.brand.is_empty() {
            minor.push("品牌缺失".to_string());
        }
        if input.model_number.is_empty() {
            minor.push("型号缺失".to_string());
        }
        if input.description.len() < self.min_description_len {
            minor.push("描述过短".to_string());
        }
        if input.expects_size && input.size_inches.is_none() {
            minor.push("显示尺寸缺失".to_string());
        }
        if input.name.eq_ignore_ascii_case(input.model_number) && input.description.is_empty() {
            minor.push("名称仅为型号".to_string());
        }

        let quality = if !severe.is_empty() || minor.len() >= 2 {
            DataQuality::Poor
        } else if minor.len() == 1 {
            DataQuality::Fair
        } else {
            DataQuality::Good
        };

        severe.extend(minor);
        (quality, severe)
    }
}
