// ==========================================
// 铁路装车编组计划 - 配置层
// ==========================================
// 职责: 约束目录 (默认阈值/常量) + 约束覆写加载与解析
// ==========================================

pub mod catalog;
pub mod constraint_loader;
pub mod error;

// 重导出
pub use catalog::{default_threshold, relaxation_step, resolve_constraints, DEFAULT_CONSTRAINTS};
pub use constraint_loader::{default_constraints_path, ConstraintConfigLoader, CONSTRAINTS_PATH_ENV};
pub use error::{ConfigResult, ConstraintConfigError};
