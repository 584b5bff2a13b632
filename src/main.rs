// ==========================================
// AV BOQ 生成引擎 - 命令行入口
// ==========================================
// 子命令:
// - generate: 目录 + 房间请求 → BOQ JSON（可选保存 / 理由 / CSV 导出）
// - targets:  仅输出工程目标值
// ==========================================

use anyhow::{bail, Context, Result};
use av_boq_engine::config::EngineConfig;
use av_boq_engine::domain::Catalog;
use av_boq_engine::engine::GenerationRequest;
use av_boq_engine::logging::{self, LogFormat};
use av_boq_engine::repository::room_key;
use av_boq_engine::{db, BoqApi, APP_NAME, VERSION};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Command-line arguments for av-boq
#[derive(Parser, Debug)]
#[command(name = "av-boq")]
#[command(about = "Generate AV bills of quantities from room specifications and a product catalog")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one BOQ per room request
    Generate {
        /// Product catalog (.csv / .xlsx / .xls); defaults to the last catalog recorded in --db
        #[arg(short, long, env = "AV_BOQ_CATALOG")]
        catalog: Option<PathBuf>,

        /// Room request JSON (single request or array)
        #[arg(short, long)]
        room: PathBuf,

        /// Engine configuration overlay JSON
        #[arg(long)]
        config: Option<PathBuf>,

        /// SQLite database for config overrides and saved BOQs
        #[arg(long)]
        db: Option<PathBuf>,

        /// Save generated BOQs (uses the default database when --db is absent)
        #[arg(long)]
        save: bool,

        /// CSV export path (one file per room when several rooms are given)
        #[arg(long)]
        export: Option<PathBuf>,

        /// Attach template justifications to the export
        #[arg(long)]
        justify: bool,

        /// Fixed generation timestamp (RFC 3339) for reproducible output
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Print engineering targets for each room request
    Targets {
        /// Room request JSON (single request or array)
        #[arg(short, long)]
        room: PathBuf,

        /// Engine configuration overlay JSON
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// 房间请求文件: 单个请求或请求数组
#[derive(Deserialize)]
#[serde(untagged)]
enum RoomInput {
    Many(Vec<GenerationRequest>),
    One(GenerationRequest),
}

fn read_requests(path: &Path) -> Result<Vec<GenerationRequest>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取房间请求: {}", path.display()))?;
    let input: RoomInput = serde_json::from_str(&raw)
        .with_context(|| format!("房间请求格式错误: {}", path.display()))?;
    let requests = match input {
        RoomInput::Many(requests) => requests,
        RoomInput::One(request) => vec![request],
    };
    if requests.is_empty() {
        bail!("房间请求为空: {}", path.display());
    }
    Ok(requests)
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("引擎配置加载失败: {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// 多房间导出时按房间键拆分文件名
fn export_path(base: &Path, room_label: &str, multiple: bool) -> PathBuf {
    if !multiple {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("boq");
    base.with_file_name(format!("{}_{}.csv", stem, room_key(room_label)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_with_format(if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    });
    info!("{} v{}", APP_NAME, VERSION);

    match cli.command {
        Command::Generate {
            catalog,
            room,
            config,
            db,
            save,
            export,
            justify,
            at,
        } => {
            let empty = Catalog::new("empty", Vec::new());
            let api = if save || db.is_some() {
                let db_path = db.unwrap_or_else(db::default_db_path);
                if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("无法创建数据目录: {}", parent.display()))?;
                }
                BoqApi::open(empty, config.as_deref(), &db_path)?
            } else {
                BoqApi::new(empty, Arc::new(load_config(config.as_deref())?))
            };

            let catalog = match catalog {
                Some(path) => path,
                None => match api.stored_catalog_path()? {
                    Some(path) => path,
                    None => bail!("未指定 --catalog,数据库中也没有已记录的目录路径"),
                },
            };
            let report = api.load_catalog(&catalog)?;
            info!(
                version = %report.catalog_version,
                loaded = report.loaded,
                skipped = report.skipped.len(),
                "目录已加载"
            );

            let mut requests = read_requests(&room)?;
            if let Some(ts) = at {
                for request in requests.iter_mut().filter(|r| r.generated_at.is_none()) {
                    request.generated_at = Some(ts);
                }
            }
            let multiple = requests.len() > 1;

            let mut boqs = Vec::new();
            let mut failed = 0usize;
            for result in api.generate_project(requests).await {
                match result {
                    Ok(boq) => boqs.push(boq),
                    Err(e) => {
                        error!(error = %format!("{:#}", e), "房间生成失败");
                        failed += 1;
                    }
                }
            }

            for boq in &boqs {
                if save {
                    let record_id = api.save(boq)?;
                    info!(room = %boq.metadata.room_label, record_id = %record_id, "BOQ 已保存");
                }
                if let Some(base) = &export {
                    let justifications = if justify {
                        api.justify(boq).await.texts
                    } else {
                        Default::default()
                    };
                    let path = export_path(base, &boq.metadata.room_label, multiple);
                    api.export_csv(boq, &justifications, &path)?;
                }
            }

            let output = if multiple {
                let summary = api.summarize_project(&boqs);
                if summary.has_suggestions() {
                    info!(displaced = summary.displaced_total(), notes = summary.notes.len(), "存在项目级合并建议");
                }
                serde_json::to_string_pretty(&serde_json::json!({ "rooms": boqs, "summary": summary }))?
            } else {
                match boqs.first() {
                    Some(boq) => serde_json::to_string_pretty(boq)?,
                    None => String::from("null"),
                }
            };
            println!("{}", output);

            if failed > 0 {
                bail!("{} 个房间生成失败", failed);
            }
        }

        Command::Targets { room, config } => {
            let config = Arc::new(load_config(config.as_deref())?);
            let api = BoqApi::new(Catalog::new("empty", Vec::new()), config);

            let mut all = Vec::new();
            for request in read_requests(&room)? {
                let targets = api
                    .targets(&request.room)
                    .with_context(|| format!("房间 {} 目标值计算失败", request.room_label))?;
                all.push(serde_json::json!({
                    "room_label": request.room_label,
                    "targets": targets,
                }));
            }
            println!("{}", serde_json::to_string_pretty(&all)?);
        }
    }

    Ok(())
}
