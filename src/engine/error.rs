// ==========================================
// AV BOQ 生成引擎 - 引擎层错误类型
// ==========================================
// 说明: NoCandidate 是值（UnresolvedRequirement）,不在此处
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 房间尺寸非法（≤0 / 非有限值 / 吊顶超出范围）
    #[error("房间几何参数非法: {0}")]
    InvalidGeometry(String),

    #[error("容纳人数非法: {0}")]
    InvalidCapacity(String),

    /// 可选覆写参数非法（元素高度比例、桌长等）
    #[error("房间参数非法 (field={field}): {message}")]
    InvalidParameter { field: String, message: String },

    #[error("内部错误: {0}")]
    Internal(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
