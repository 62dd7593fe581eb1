// ==========================================
// 铁路装车编组计划 - 引擎入口函数
// ==========================================
// 职责: 以默认语言 (en) 提供无状态的一次性调用入口
// 需要其他语言时直接构造对应的校验器/建议器/报告器
// ==========================================

use crate::config::catalog::resolve_constraints;
use crate::config::error::ConfigResult;
use crate::domain::constraint::ConstraintSet;
use crate::domain::rake::Rake;
use crate::domain::violation::{RelaxationSuggestion, ValidationResult, Violation};
use crate::engine::hard::HardConstraintValidator;
use crate::engine::plan::PlanValidator;
use crate::engine::relaxation::RelaxationAdvisor;
use crate::engine::report::ViolationReporter;
use crate::engine::soft::SoftConstraintValidator;
use chrono::{DateTime, Utc};

/// 校验单个编组的硬约束
pub fn validate_hard_constraints(
    rake: &Rake,
    constraints: &ConstraintSet,
    reference_time: DateTime<Utc>,
) -> ConfigResult<Vec<Violation>> {
    let effective = resolve_constraints(constraints)?;
    Ok(HardConstraintValidator::new().validate(rake, &effective, reference_time))
}

/// 校验单个编组的软约束
///
/// 数据质量提示 (0 吨编组) 不在返回值中, 需要时使用 `SoftConstraintValidator::check`
pub fn validate_soft_constraints(
    rake: &Rake,
    constraints: &ConstraintSet,
    reference_time: DateTime<Utc>,
) -> ConfigResult<Vec<Violation>> {
    let effective = resolve_constraints(constraints)?;
    Ok(SoftConstraintValidator::new().validate(rake, &effective, reference_time))
}

/// 校验整个计划
pub fn validate_plan(
    rakes: &[Rake],
    constraints: &ConstraintSet,
    reference_time: DateTime<Utc>,
) -> ConfigResult<ValidationResult> {
    PlanValidator::new().validate_plan(rakes, constraints, reference_time)
}

pub fn suggest_relaxations(violations: &[Violation]) -> Vec<RelaxationSuggestion> {
    RelaxationAdvisor::new().suggest(violations)
}

pub fn apply_relaxation(
    constraints: &ConstraintSet,
    relaxations: &[RelaxationSuggestion],
) -> ConstraintSet {
    RelaxationAdvisor::apply(constraints, relaxations)
}

pub fn summarize(result: &ValidationResult) -> String {
    ViolationReporter::new().summarize(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ConstraintId;
    use chrono::{Duration, TimeZone};

    fn reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_single_rake_entry_points() {
        let rake = Rake::new(
            "R1",
            50.0,
            60.0,
            60_000.0,
            reference_time() + Duration::hours(80),
        );

        let hard =
            validate_hard_constraints(&rake, &ConstraintSet::default(), reference_time()).unwrap();
        let soft =
            validate_soft_constraints(&rake, &ConstraintSet::default(), reference_time()).unwrap();

        assert_eq!(hard.len(), 2);
        assert!(hard.iter().all(|v| v.is_hard()));
        assert!(soft.iter().all(|v| !v.is_hard()));
        assert!(soft
            .iter()
            .any(|v| v.constraint_id == ConstraintId::MinUtilization));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let rake = Rake::new("R1", 70.0, 85.0, 1.0, reference_time());
        let constraints = ConstraintSet {
            max_rake_size: Some(f64::NAN),
            ..Default::default()
        };
        assert!(validate_hard_constraints(&rake, &constraints, reference_time()).is_err());
        assert!(validate_soft_constraints(&rake, &constraints, reference_time()).is_err());
    }

    #[test]
    fn test_summarize_empty_plan() {
        let result = validate_plan(&[], &ConstraintSet::default(), reference_time()).unwrap();
        assert!(summarize(&result).contains("100/100"));
        let violations: Vec<Violation> = result.all_violations().cloned().collect();
        assert!(suggest_relaxations(&violations).is_empty());
    }
}
