// ==========================================
// AV BOQ 生成引擎 - BOQ 数据仓储
// ==========================================
// 职责: 按 (项目, 房间键) 持久化 BOQ JSON
// 红线: Repository 不含业务逻辑,只做数据 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::boq::BillOfQuantities;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// 房间名称 → 持久化键（小写,非字母数字折叠为 '_'）
pub fn room_key(room_label: &str) -> String {
    let mut key = String::with_capacity(room_label.len());
    let mut last_sep = true;
    for c in room_label.trim().chars() {
        if c.is_alphanumeric() {
            key.extend(c.to_lowercase());
            last_sep = false;
        } else if !last_sep {
            key.push('_');
            last_sep = true;
        }
    }
    if key.ends_with('_') {
        key.pop();
    }
    key
}

/// 列表视图（不含 BOQ 正文）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoqRecordSummary {
    pub record_id: String,
    pub project_id: String,
    pub room_key: String,
    pub room_label: String,
    pub catalog_version: String,
    pub grade: String,
    pub total_score: f64,
    pub hardware_total: f64,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// BoqRepository - BOQ 仓储
// ==========================================
pub struct BoqRepository {
    conn: Arc<Mutex<Connection>>,
}

impl BoqRepository {
    /// 打开数据库并确保表结构存在
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_schema()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn ensure_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS boq_record (
                record_id TEXT NOT NULL UNIQUE,
                project_id TEXT NOT NULL,
                room_key TEXT NOT NULL,
                room_label TEXT NOT NULL,
                catalog_version TEXT NOT NULL,
                engine_version TEXT NOT NULL,
                grade TEXT NOT NULL,
                total_score REAL NOT NULL,
                hardware_total REAL NOT NULL,
                boq_json TEXT NOT NULL,
                generated_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (project_id, room_key)
            );
            "#,
        )?;
        Ok(())
    }

    /// 保存 BOQ（同项目同房间覆盖,保留原 record_id）
    ///
    /// # 返回
    /// - Ok(String): record_id
    pub fn save(&self, boq: &BillOfQuantities) -> RepositoryResult<String> {
        let key = room_key(&boq.metadata.room_label);
        if key.is_empty() {
            return Err(RepositoryError::FieldValueError {
                field: "room_label".to_string(),
                message: "房间名称不能为空".to_string(),
            });
        }

        let json = serde_json::to_string(boq)?;
        let now = Utc::now();
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO boq_record (
                record_id, project_id, room_key, room_label,
                catalog_version, engine_version, grade, total_score, hardware_total,
                boq_json, generated_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT(project_id, room_key) DO UPDATE SET
                room_label = excluded.room_label,
                catalog_version = excluded.catalog_version,
                engine_version = excluded.engine_version,
                grade = excluded.grade,
                total_score = excluded.total_score,
                hardware_total = excluded.hardware_total,
                boq_json = excluded.boq_json,
                generated_at = excluded.generated_at,
                updated_at = excluded.updated_at
            "#,
            params![
                Uuid::new_v4().to_string(),
                boq.metadata.project_id,
                key,
                boq.metadata.room_label,
                boq.metadata.catalog_version,
                boq.metadata.engine_version,
                boq.report.grade.to_string(),
                boq.report.total,
                boq.hardware_total(),
                json,
                boq.metadata.generated_at.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;

        let record_id: String = conn.query_row(
            "SELECT record_id FROM boq_record WHERE project_id = ?1 AND room_key = ?2",
            params![boq.metadata.project_id, key],
            |row| row.get(0),
        )?;
        Ok(record_id)
    }

    /// 按项目与房间名称读取 BOQ
    pub fn find(&self, project_id: &str, room_label: &str) -> RepositoryResult<Option<BillOfQuantities>> {
        let conn = self.get_conn()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT boq_json FROM boq_record WHERE project_id = ?1 AND room_key = ?2",
                params![project_id, room_key(room_label)],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// 项目下全部 BOQ 摘要（按房间键排序）
    pub fn list_by_project(&self, project_id: &str) -> RepositoryResult<Vec<BoqRecordSummary>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT record_id, project_id, room_key, room_label, catalog_version,
                   grade, total_score, hardware_total, updated_at
            FROM boq_record
            WHERE project_id = ?1
            ORDER BY room_key
            "#,
        )?;

        let rows = stmt.query_map(params![project_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, f64>(6)?,
                row.get::<_, f64>(7)?,
                row.get::<_, String>(8)?,
            ))
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            let (record_id, project_id, room_key, room_label, catalog_version, grade, total_score, hardware_total, updated_at) =
                row?;
            let updated_at = DateTime::parse_from_rfc3339(&updated_at)
                .map_err(|e| RepositoryError::FieldValueError {
                    field: "updated_at".to_string(),
                    message: e.to_string(),
                })?
                .with_timezone(&Utc);
            summaries.push(BoqRecordSummary {
                record_id,
                project_id,
                room_key,
                room_label,
                catalog_version,
                grade,
                total_score,
                hardware_total,
                updated_at,
            });
        }
        Ok(summaries)
    }

    /// 删除 BOQ,返回是否存在
    pub fn delete(&self, project_id: &str, room_label: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM boq_record WHERE project_id = ?1 AND room_key = ?2",
            params![project_id, room_key(room_label)],
        )?;
        Ok(affected > 0)
    }
}
