// ==========================================
// 铁路装车编组计划 - 约束配置错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 无效阈值在解析时拒绝, 不得静默使用
// ==========================================

use crate::domain::types::ConstraintId;
use thiserror::Error;

/// 约束配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstraintConfigError {
    // ===== 阈值错误 =====
    #[error("约束阈值无效 ({field}): 必须为正数，实际 {value}")]
    NonPositive { field: ConstraintId, value: f64 },

    #[error("约束阈值无效 ({field}): 非有限数值 {value}")]
    NotFinite { field: ConstraintId, value: f64 },

    #[error("约束区间倒置: {min_field}={min} 大于 {max_field}={max}")]
    InvertedRange {
        min_field: ConstraintId,
        min: f64,
        max_field: ConstraintId,
        max: f64,
    },

    #[error("装车时段无效: start_hour={start_hour}, end_hour={end_hour}（要求 0 <= start < end <= 24）")]
    InvalidLoadingWindow { start_hour: f64, end_hour: f64 },

    // ===== 配置文件错误 =====
    #[error("约束配置读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("约束配置解析失败: {0}")]
    ParseError(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConstraintConfigError>;
