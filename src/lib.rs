// ==========================================
// 铁路装车编组计划 - 核心库
// ==========================================
// 系统定位: 决策支持系统 (计划员最终控制权)
// 本库范围: 编组 (rake) 约束校验与可行性评分引擎
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 约束目录与覆写
pub mod config;

// 引擎层 - 约束校验/评分/放宽建议
pub mod engine;

// API 层 - 宿主调用入口 (JSON 形态)
pub mod api;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ConstraintId, Severity, ThresholdBound, ViolationKind};

// 领域实体
pub use domain::{
    ConstraintSet, DataQualityNote, EffectiveConstraints, LoadingWindow, Rake,
    RelaxationSuggestion, ValidationResult, Violation,
};

// 配置
pub use config::{ConstraintConfigError, ConstraintConfigLoader};

// 引擎
pub use engine::{
    apply_relaxation, suggest_relaxations, summarize, validate_hard_constraints, validate_plan,
    validate_soft_constraints, FeasibilityScorer, HardConstraintValidator, PlanValidator,
    RelaxationAdvisor, SoftConstraintValidator, ViolationReporter,
};

// API
pub use api::{ApiError, ValidationApi, ValidationRequest, ValidationResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Rail Rake APS";
