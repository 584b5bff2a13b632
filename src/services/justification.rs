// ==========================================
// AV BOQ 生成引擎 - 选型理由服务
// ==========================================
// 职责: 消费已完成的 BOQ,为每个条目生成选型理由
// 红线: 只读 BOQ;单条失败/超时不影响其余条目,也不改变 BOQ
// ==========================================

use crate::domain::boq::{BillOfQuantities, SelectedItem};
use crate::domain::types::ProductCategory;
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JustificationError {
    #[error("理由生成超时: {0}")]
    Timeout(String),

    #[error("理由服务不可用: {0}")]
    Unavailable(String),

    #[error("理由生成失败 (item={item}): {message}")]
    Failed { item: String, message: String },
}

/// 理由生成服务（外部协作方,如 LLM 文案服务）
#[async_trait]
pub trait JustificationService: Send + Sync {
    async fn justify(&self, boq: &BillOfQuantities, item: &SelectedItem) -> Result<String, JustificationError>;
}

/// 分发结果: 需求键 → 理由文本 / 失败原因
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JustificationSet {
    pub texts: BTreeMap<String, String>,
    pub failures: BTreeMap<String, String>,
}

// ==========================================
// JustificationDispatcher - 并发分发
// ==========================================
pub struct JustificationDispatcher {
    service: Arc<dyn JustificationService>,
    timeout: Duration,
}

impl JustificationDispatcher {
    pub fn new(service: Arc<dyn JustificationService>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    /// 为全部条目并发生成理由（每条独立超时）
    pub async fn dispatch(&self, boq: &BillOfQuantities) -> JustificationSet {
        let calls = boq.items.iter().map(|item| async move {
            let key = item.requirement.key.clone();
            let result = match tokio::time::timeout(self.timeout, self.service.justify(boq, item)).await {
                Ok(result) => result,
                Err(_) => Err(JustificationError::Timeout(key.clone())),
            };
            (key, result)
        });

        let mut set = JustificationSet::default();
        for (key, result) in join_all(calls).await {
            match result {
                Ok(text) => {
                    set.texts.insert(key, text);
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "条目理由生成失败");
                    set.failures.insert(key, e.to_string());
                }
            }
        }

        info!(
            room = %boq.metadata.room_label,
            ok = set.texts.len(),
            failed = set.failures.len(),
            "选型理由分发完成"
        );
        set
    }
}

// ==========================================
// TemplateJustifier - 内置模板理由
// ==========================================
// 由工程目标值生成确定性文本,无外部依赖
pub struct TemplateJustifier;

impl TemplateJustifier {
    pub fn render(boq: &BillOfQuantities, item: &SelectedItem) -> String {
        let t = &boq.targets;
        let req = &item.requirement;
        let product = format!("{} {}", item.product.brand, item.product.model_number)
            .trim()
            .to_string();

        let detail = if req.category == ProductCategory::Displays {
            format!(
                "{}in recommended for a {:.1}ft farthest viewer ({} viewing)",
                t.recommended_display_in, t.max_viewing_distance_ft, t.viewing_task
            )
        } else if req.is_speaker() {
            format!(
                "{} speakers at {:.0} sq ft coverage each for {:.0} sq ft",
                t.speaker_count, t.speaker_coverage_sqft, t.room_area_sqft
            )
        } else if req.is_microphone() {
            format!("{} pickup zones for the seating area", t.microphone_count)
        } else if req.category == ProductCategory::Infrastructure {
            format!("{:.0} W estimated load, {}", t.power_draw_watts, t.circuit_rating)
        } else if req.category == ProductCategory::Networking {
            format!("{:.1} Mbps estimated AV traffic", t.network_bandwidth_mbps)
        } else {
            format!("{} tier room", t.room_tier)
        };

        let rationale = if req.rationale.is_empty() {
            req.sub_category.as_str()
        } else {
            req.rationale.as_str()
        };
        format!("{}. {} x{}: {}.", rationale, product, item.quantity, detail)
    }
}

#[async_trait]
impl JustificationService for TemplateJustifier {
    async fn justify(&self, boq: &BillOfQuantities, item: &SelectedItem) -> Result<String, JustificationError> {
        Ok(Self::render(boq, item))
    }
}
