// ==========================================
// 铁路装车编组计划 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 将边界输入问题与配置错误转换为可解释的错误消息
// 红线: 所有错误信息必须包含显式原因
// ==========================================

use crate::config::error::ConstraintConfigError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    /// 请求格式错误 / 编组字段缺失或取值非法
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("约束配置错误: {0}")]
    ConstraintConfig(#[from] ConstraintConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("序列化失败: {0}")]
    SerializationError(String),
}

// ==========================================
// 从 serde_json::Error 转换
// 目的: 请求反序列化失败属于输入错误, 输出序列化失败属于内部错误
// ==========================================
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Syntax | Category::Data | Category::Eof => {
                ApiError::InvalidInput(format!("请求 JSON 解析失败: {}", err))
            }
            Category::Io => ApiError::SerializationError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
