// ==========================================
// AV BOQ 生成引擎 - 生成编排器
// ==========================================
// 用途: 协调六个核心组件的执行顺序
// 流程: 需求计算 → 蓝图 → 选型 → 协调 → 评分 → 装配
// 红线: 单房间流程同步执行;多房间各自独立,共享同一目录快照
// 红线: generated_at 由调用方提供时,同输入同目录产出逐字节一致的 BOQ
// ==========================================

use crate::config::EngineConfig;
use crate::domain::boq::{BillOfQuantities, BoqMetadata};
use crate::domain::catalog::Catalog;
use crate::domain::room::RoomSpecification;
use crate::engine::assembler::Assembler;
use crate::engine::blueprint::BlueprintBuilder;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::quality::{QualityScorer, ScoringInput};
use crate::engine::reconciler::CrossItemReconciler;
use crate::engine::requirement_calc::RequirementCalculator;
use crate::engine::resolver::CandidateResolver;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// 引擎版本（写入 BOQ 元数据）
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

// ==========================================
// GenerationRequest - 单房间生成请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub project_id: String,
    /// 房间名称（同项目内唯一,作为持久化键）
    pub room_label: String,
    pub room: RoomSpecification,
    /// 缺省取当前时间
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl GenerationRequest {
    pub fn new(project_id: impl Into<String>, room_label: impl Into<String>, room: RoomSpecification) -> Self {
        Self {
            project_id: project_id.into(),
            room_label: room_label.into(),
            room,
            generated_at: None,
        }
    }

    pub fn at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }
}

// ==========================================
// BoqGenerator - 生成编排器
// ==========================================
pub struct BoqGenerator {
    config: Arc<EngineConfig>,
    calculator: RequirementCalculator,
    blueprint: BlueprintBuilder,
    reconciler: CrossItemReconciler,
    scorer: QualityScorer,
}

impl BoqGenerator {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            calculator: RequirementCalculator::new(config.clone()),
            blueprint: BlueprintBuilder::new(config.clone()),
            reconciler: CrossItemReconciler::new(&config.reconciler),
            scorer: QualityScorer::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &Arc<EngineConfig> {
        &self.config
    }

    /// 单房间生成（同步）
    ///
    /// # 错误
    /// 仅房间规格非法时失败;无候选的需求作为 unresolved 值返回
    #[instrument(skip(self, request, catalog), fields(project = %request.project_id, room = %request.room_label))]
    pub fn generate(&self, request: &GenerationRequest, catalog: &Catalog) -> EngineResult<BillOfQuantities> {
        let room = &request.room;

        // 步骤1: 工程目标值
        let targets = self.calculator.compute(room)?;

        // 步骤2: 抽象需求蓝图
        let requirements = self.blueprint.build(room, &targets);

        // 步骤3: 逐项选型
        let resolver = CandidateResolver::for_room(room, self.config.clone());
        let (items, unresolved) = resolver.resolve_all(&requirements, catalog);

        // 步骤4: 跨条目协调
        let outcome = self.reconciler.reconcile(items);

        // 步骤5: 质量评分
        let report = self.scorer.score(&ScoringInput {
            room,
            targets: &targets,
            requirements: &requirements,
            items: &outcome.items,
            unresolved: &unresolved,
            flags: &outcome.flags,
        });

        info!(
            catalog_version = %catalog.version(),
            tier = %targets.room_tier,
            requirements = requirements.len(),
            items = outcome.items.len(),
            unresolved = unresolved.len(),
            removed = outcome.removed.len(),
            score = report.total,
            grade = %report.grade,
            "BOQ 生成完成"
        );

        // 步骤6: 装配
        let metadata = BoqMetadata {
            project_id: request.project_id.clone(),
            room_label: request.room_label.clone(),
            catalog_version: catalog.version().to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            generated_at: request.generated_at.unwrap_or_else(Utc::now),
        };
        Ok(Assembler::assemble(
            metadata,
            room.clone(),
            targets,
            outcome,
            unresolved,
            report,
        ))
    }

    /// 多房间并行生成
    ///
    /// 每个房间一个阻塞任务,共享同一目录快照;结果顺序与请求顺序一致
    pub async fn generate_project(
        self: Arc<Self>,
        requests: Vec<GenerationRequest>,
        catalog: Arc<Catalog>,
    ) -> Vec<EngineResult<BillOfQuantities>> {
        info!(rooms = requests.len(), catalog_version = %catalog.version(), "开始项目生成");

        let tasks = requests.into_iter().map(|request| {
            let generator = Arc::clone(&self);
            let catalog = Arc::clone(&catalog);
            tokio::task::spawn_blocking(move || generator.generate(&request, &catalog))
        });

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(result) => result,
                Err(e) => Err(EngineError::Internal(format!("房间生成任务失败: {}", e))),
            })
            .collect()
    }
}
