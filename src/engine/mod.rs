// ==========================================
// 铁路装车编组计划 - 引擎层
// ==========================================
// 职责: 硬/软约束校验, 可行性评分, 放宽建议, 违规报告
// 红线: 引擎无状态, 不读取时钟 (参考时间由调用方传入)
// 红线: 每条违规必须带 message 与 fix_suggestion
// ==========================================

pub mod feasibility;
pub mod hard;
pub mod operations;
pub mod plan;
pub mod relaxation;
pub mod report;
pub mod soft;

pub use feasibility::FeasibilityScorer;
pub use hard::HardConstraintValidator;
pub use operations::{
    apply_relaxation, summarize, suggest_relaxations, validate_hard_constraints, validate_plan,
    validate_soft_constraints,
};
pub use plan::PlanValidator;
pub use relaxation::RelaxationAdvisor;
pub use report::ViolationReporter;
pub use soft::{SoftCheckOutcome, SoftConstraintValidator};
