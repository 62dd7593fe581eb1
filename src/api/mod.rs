// ==========================================
// 铁路装车编组计划 - API 层
// ==========================================
// 职责: 提供 JSON 形态的调用入口, 供计划服务 / 命令行调用
// ==========================================

pub mod dto;
pub mod error;
pub mod validation_api;

// 重导出核心类型
pub use dto::{ValidationRequest, ValidationResponse};
pub use error::{ApiError, ApiResult};
pub use validation_api::ValidationApi;
