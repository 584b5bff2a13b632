// ==========================================
// AV BOQ 生成引擎 - BOQ 导出
// ==========================================
// 职责: BOQ → 外部文档格式（CSV）
// 红线: 只读 BOQ;货币/税费计算不在导出范围内
// ==========================================

use crate::domain::boq::BillOfQuantities;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV 缓冲失败: {0}")]
    Buffer(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// 导出器接口
pub trait BoqExporter: Send + Sync {
    /// 写入任意输出流
    fn export(
        &self,
        boq: &BillOfQuantities,
        justifications: &BTreeMap<String, String>,
        writer: &mut dyn Write,
    ) -> ExportResult<()>;

    /// 写入文件
    fn export_to_file(
        &self,
        boq: &BillOfQuantities,
        justifications: &BTreeMap<String, String>,
        path: &Path,
    ) -> ExportResult<()> {
        let mut file = std::fs::File::create(path)?;
        self.export(boq, justifications, &mut file)?;
        info!(path = %path.display(), items = boq.items.len(), "BOQ 已导出");
        Ok(())
    }
}

// ==========================================
// CsvBoqExporter - CSV 导出
// ==========================================
// 行顺序: 条目 → 未满足需求 → 合计
pub struct CsvBoqExporter;

const HEADER: [&str; 11] = [
    "Line",
    "Requirement",
    "Category",
    "Brand",
    "Model",
    "Description",
    "Qty",
    "Unit Price",
    "Line Total",
    "Confidence",
    "Justification",
];

impl BoqExporter for CsvBoqExporter {
    fn export(
        &self,
        boq: &BillOfQuantities,
        justifications: &BTreeMap<String, String>,
        writer: &mut dyn Write,
    ) -> ExportResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(HEADER)?;

        for (idx, item) in boq.items.iter().enumerate() {
            let key = &item.requirement.key;
            wtr.write_record([
                (idx + 1).to_string(),
                key.clone(),
                item.product.category.label().to_string(),
                item.product.brand.clone(),
                item.product.model_number.clone(),
                item.product.name.clone(),
                item.quantity.to_string(),
                format!("{:.2}", item.product.price),
                format!("{:.2}", item.line_total()),
                format!("{:.2}", item.confidence),
                justifications.get(key).cloned().unwrap_or_default(),
            ])?;
        }

        for miss in &boq.unresolved {
            let req = &miss.requirement;
            wtr.write_record([
                String::new(),
                req.key.clone(),
                req.category.label().to_string(),
                String::new(),
                String::new(),
                format!("UNRESOLVED: {} ({})", req.sub_category, miss.eliminated_at),
                req.quantity.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ])?;
        }

        let mut total = vec![String::new(); HEADER.len()];
        total[5] = format!("TOTAL (grade {}, score {:.1})", boq.report.grade, boq.report.total);
        total[6] = boq.item_count().to_string();
        total[8] = format!("{:.2}", boq.hardware_total());
        wtr.write_record(&total)?;

        wtr.flush()?;
        Ok(())
    }
}

impl CsvBoqExporter {
    /// 导出为字符串（CLI 预览与测试用）
    pub fn export_to_string(&self, boq: &BillOfQuantities, justifications: &BTreeMap<String, String>) -> ExportResult<String> {
        let mut buffer = Vec::new();
        self.export(boq, justifications, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| ExportError::Buffer(e.to_string()))
    }
}
