// ==========================================
// 铁路装车编组计划 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含引擎逻辑, 不含 I/O
// ==========================================

pub mod constraint;
pub mod rake;
pub mod types;
pub mod violation;

// 重导出核心类型
pub use constraint::{ConstraintSet, EffectiveConstraints, LoadingWindow};
pub use rake::Rake;
pub use types::{ConstraintId, Severity, ThresholdBound, ViolationKind};
pub use violation::{DataQualityNote, RelaxationSuggestion, ValidationResult, Violation};
