// ==========================================
// AV BOQ 生成引擎 - BOQ 业务接口
// ==========================================
// 职责: 目录快照 → 生成器 → 协作方（持久化 / 理由 / 导出）的统一入口
// 红线: 配置在生成前一次性解析;目录替换不影响进行中的生成
// ==========================================

use crate::config::{config_keys, ConfigManager, EngineConfig};
use crate::db::open_sqlite_connection;
use crate::domain::boq::BillOfQuantities;
use crate::domain::catalog::{Catalog, CatalogHandle, CatalogLoadReport};
use crate::domain::project::ProjectSummary;
use crate::domain::room::RoomSpecification;
use crate::domain::targets::EngineeringTargets;
use crate::engine::{BoqGenerator, GenerationRequest, ProjectConsolidator, RequirementCalculator};
use crate::importer::CatalogLoader;
use crate::repository::{BoqRecordSummary, BoqRepository};
use crate::services::{
    BoqExporter, CsvBoqExporter, JustificationDispatcher, JustificationService, JustificationSet,
    TemplateJustifier,
};
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

/// 单条理由生成的默认超时
pub const DEFAULT_JUSTIFICATION_TIMEOUT: Duration = Duration::from_secs(10);

// ==========================================
// BoqApi - BOQ 业务接口
// ==========================================
pub struct BoqApi {
    catalog: CatalogHandle,
    generator: Arc<BoqGenerator>,
    repository: Option<BoqRepository>,
    settings: Option<ConfigManager>,
    exporter: CsvBoqExporter,
    dispatcher: JustificationDispatcher,
}

impl BoqApi {
    /// 以给定配置创建（不落库）
    pub fn new(catalog: Catalog, config: Arc<EngineConfig>) -> Self {
        Self {
            catalog: CatalogHandle::new(catalog),
            generator: Arc::new(BoqGenerator::new(config)),
            repository: None,
            settings: None,
            exporter: CsvBoqExporter,
            dispatcher: JustificationDispatcher::new(
                Arc::new(TemplateJustifier),
                DEFAULT_JUSTIFICATION_TIMEOUT,
            ),
        }
    }

    /// 打开数据库: 解析配置覆写并启用 BOQ 持久化
    ///
    /// 配置文件与数据库覆写的优先级见 ConfigManager::resolve_engine_config
    pub fn open(catalog: Catalog, config_file: Option<&Path>, db_path: &Path) -> Result<Self> {
        let db = db_path
            .to_str()
            .ok_or_else(|| anyhow!("数据库路径不是合法 UTF-8: {}", db_path.display()))?;
        let conn = open_sqlite_connection(db)
            .with_context(|| format!("无法打开数据库: {}", db_path.display()))?;
        let conn = Arc::new(Mutex::new(conn));

        let settings = ConfigManager::from_connection(conn.clone()).context("配置表初始化失败")?;
        let config = settings
            .resolve_engine_config(config_file)
            .context("引擎配置解析失败")?;
        let repository = BoqRepository::from_connection(conn).context("BOQ 表初始化失败")?;

        info!(db = %db_path.display(), "BoqApi 已连接数据库");
        let mut api = Self::new(catalog, Arc::new(config)).with_repository(repository);
        api.settings = Some(settings);
        Ok(api)
    }

    pub fn with_repository(mut self, repository: BoqRepository) -> Self {
        self.repository = Some(repository);
        self
    }

    /// 替换理由生成服务（如外部文案服务）
    pub fn with_justification_service(
        mut self,
        service: Arc<dyn JustificationService>,
        timeout: Duration,
    ) -> Self {
        self.dispatcher = JustificationDispatcher::new(service, timeout);
        self
    }

    pub fn config(&self) -> &Arc<EngineConfig> {
        self.generator.config()
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.snapshot()
    }

    /// 从文件加载目录并原子替换当前快照
    ///
    /// 已连接数据库时记录目录路径,供下次省略 --catalog 时使用
    pub fn load_catalog(&self, path: &Path) -> Result<CatalogLoadReport> {
        let (catalog, report) = CatalogLoader::default()
            .load_file(path)
            .with_context(|| format!("目录加载失败: {}", path.display()))?;
        let previous = self.catalog.replace(catalog);
        info!(
            previous = %previous.version(),
            current = %report.catalog_version,
            loaded = report.loaded,
            "目录快照已替换"
        );

        if let Some(settings) = &self.settings {
            settings
                .set_global_config_value(config_keys::CATALOG_PATH, &path.display().to_string())
                .context("目录路径记录失败")?;
        }
        Ok(report)
    }

    /// 上次加载的目录路径（未连接数据库时为 None）
    pub fn stored_catalog_path(&self) -> Result<Option<PathBuf>> {
        match &self.settings {
            Some(settings) => Ok(settings
                .get_global_config_value(config_keys::CATALOG_PATH)?
                .map(PathBuf::from)),
            None => Ok(None),
        }
    }

    /// 仅计算工程目标值
    pub fn targets(&self, room: &RoomSpecification) -> Result<EngineeringTargets> {
        let calculator = RequirementCalculator::new(self.config().clone());
        Ok(calculator.compute(room)?)
    }

    pub fn generate_room(&self, request: &GenerationRequest) -> Result<BillOfQuantities> {
        let catalog = self.catalog.snapshot();
        let boq = self
            .generator
            .generate(request, &catalog)
            .with_context(|| format!("房间 {} 生成失败", request.room_label))?;
        Ok(boq)
    }

    /// 多房间并行生成,结果顺序与请求顺序一致
    pub async fn generate_project(&self, requests: Vec<GenerationRequest>) -> Vec<Result<BillOfQuantities>> {
        let labels: Vec<String> = requests.iter().map(|r| r.room_label.clone()).collect();
        let results = Arc::clone(&self.generator)
            .generate_project(requests, self.catalog.snapshot())
            .await;

        results
            .into_iter()
            .zip(labels)
            .map(|(result, label)| result.with_context(|| format!("房间 {} 生成失败", label)))
            .collect()
    }

    /// 项目级合并建议（不修改各房间 BOQ）
    pub fn summarize_project(&self, boqs: &[BillOfQuantities]) -> ProjectSummary {
        ProjectConsolidator::new(self.config().clone()).summarize(boqs)
    }

    /// 保存 BOQ,返回记录 ID
    pub fn save(&self, boq: &BillOfQuantities) -> Result<String> {
        let repository = self.repository()?;
        let record_id = repository
            .save(boq)
            .with_context(|| format!("BOQ 保存失败: {}", boq.metadata.room_label))?;
        Ok(record_id)
    }

    pub fn find(&self, project_id: &str, room_label: &str) -> Result<Option<BillOfQuantities>> {
        Ok(self.repository()?.find(project_id, room_label)?)
    }

    pub fn list_project(&self, project_id: &str) -> Result<Vec<BoqRecordSummary>> {
        Ok(self.repository()?.list_by_project(project_id)?)
    }

    pub async fn justify(&self, boq: &BillOfQuantities) -> JustificationSet {
        self.dispatcher.dispatch(boq).await
    }

    pub fn export_csv(
        &self,
        boq: &BillOfQuantities,
        justifications: &BTreeMap<String, String>,
        path: &Path,
    ) -> Result<()> {
        self.exporter
            .export_to_file(boq, justifications, path)
            .with_context(|| format!("CSV 导出失败: {}", path.display()))
    }

    fn repository(&self) -> Result<&BoqRepository> {
        self.repository
            .as_ref()
            .ok_or_else(|| anyhow!("未配置数据库,无法访问已保存的 BOQ"))
    }
}
