use super::*;
use crate::domain::types::ViolationKind;
use chrono::{Duration, TimeZone};

// ==========================================
// 测试辅助函数
// ==========================================

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
}

/// 创建测试用编组
fn create_test_rake(
    rake_id: &str,
    total_load_t: f64,
    utilization_pct: f64,
    cost: f64,
    delivery_hours: i64,
) -> Rake {
    Rake::new(
        rake_id,
        total_load_t,
        utilization_pct,
        cost,
        reference_time() + Duration::hours(delivery_hours),
    )
}

/// 创建合规编组
fn create_compliant_rake(rake_id: &str) -> Rake {
    create_test_rake(rake_id, 70.0, 85.0, 60_000.0, 20)
}

fn ids(violations: &[Violation]) -> Vec<ConstraintId> {
    violations.iter().map(|v| v.constraint_id).collect()
}

// ==========================================
// 正常案例测试
// ==========================================

#[test]
fn test_scenario_compliant_single_rake() {
    let validator = PlanValidator::new();
    let result = validator
        .validate_plan(
            &[create_compliant_rake("R1")],
            &ConstraintSet::default(),
            reference_time(),
        )
        .unwrap();

    assert!(result.is_valid);
    assert!(result.hard_violations.is_empty());
    assert!(result.soft_violations.is_empty());
    assert_eq!(result.total_penalty, 0.0);
    assert_eq!(result.feasibility_score, 100);
    assert_eq!(result.rake_count, 1);
    assert_eq!(result.reference_time, reference_time());
}

#[test]
fn test_scenario_infeasible_rake() {
    crate::logging::init_test();
    let validator = PlanValidator::new();
    let rake = create_test_rake("R1", 50.0, 60.0, 60_000.0, 80);
    let result = validator
        .validate_plan(&[rake], &ConstraintSet::default(), reference_time())
        .unwrap();

    assert_eq!(
        ids(&result.hard_violations),
        vec![ConstraintId::MinRakeSize, ConstraintId::MaxDeliveryHours]
    );
    assert!(!result.is_valid);
    assert_eq!(result.feasibility_score, 0);

    let utilization = result
        .soft_violations
        .iter()
        .find(|v| v.constraint_id == ConstraintId::MinUtilization)
        .unwrap();
    assert!((utilization.penalty - 1000.0).abs() < 1e-9);

    let cost = result
        .soft_violations
        .iter()
        .find(|v| v.constraint_id == ConstraintId::MaxCostPerTonne)
        .unwrap();
    assert!((cost.penalty - 10_000.0).abs() < 1e-6);

    // 80 小时超出 48 小时期望时限 32 小时
    let delivery = result
        .soft_violations
        .iter()
        .find(|v| v.constraint_id == ConstraintId::PreferredDeliveryHours)
        .unwrap();
    assert!((delivery.penalty - 32_000.0).abs() < 1e-6);

    assert!((result.total_penalty - 43_000.0).abs() < 1e-6);
}

#[test]
fn test_scenario_rakes_per_day_exceeded() {
    let validator = PlanValidator::new();
    let rakes: Vec<Rake> = (1..=12)
        .map(|i| create_compliant_rake(&format!("R{:02}", i)))
        .collect();

    let result = validator
        .validate_plan(&rakes, &ConstraintSet::default(), reference_time())
        .unwrap();

    assert!(result.is_valid);
    assert_eq!(result.soft_violations.len(), 1);

    let v = &result.soft_violations[0];
    assert_eq!(v.constraint_id, ConstraintId::MaxRakesPerDay);
    assert_eq!(v.severity, Severity::Medium);
    assert_eq!(v.kind, ViolationKind::Soft);
    assert!((v.penalty - 10_000.0).abs() < 1e-9);
    assert_eq!(v.affected_rakes.len(), 12);
    assert_eq!(v.affected_rakes[0], "R01");
    assert_eq!(v.affected_rakes[11], "R12");

    assert!((result.total_penalty - 10_000.0).abs() < 1e-9);
    assert_eq!(result.feasibility_score, 95);
}

#[test]
fn test_exactly_max_rakes_per_day_is_compliant() {
    let validator = PlanValidator::new();
    let rakes: Vec<Rake> = (1..=10)
        .map(|i| create_compliant_rake(&format!("R{}", i)))
        .collect();

    let result = validator
        .validate_plan(&rakes, &ConstraintSet::default(), reference_time())
        .unwrap();
    assert!(result.soft_violations.is_empty());
}

// ==========================================
// 顺序与确定性
// ==========================================

#[test]
fn test_violations_follow_rake_order() {
    let validator = PlanValidator::new();
    let rakes = vec![
        create_test_rake("A", 95.0, 85.0, 60_000.0, 20),
        create_compliant_rake("B"),
        create_test_rake("C", 40.0, 85.0, 30_000.0, 20),
    ];

    let result = validator
        .validate_plan(&rakes, &ConstraintSet::default(), reference_time())
        .unwrap();

    let owners: Vec<&str> = result
        .hard_violations
        .iter()
        .map(|v| v.affected_rakes[0].as_str())
        .collect();
    assert_eq!(owners, vec!["A", "C"]);
    assert_eq!(
        ids(&result.hard_violations),
        vec![ConstraintId::MaxRakeSize, ConstraintId::MinRakeSize]
    );
}

#[test]
fn test_validation_is_idempotent() {
    let validator = PlanValidator::new();
    let rakes = vec![
        create_test_rake("R1", 50.0, 60.0, 60_000.0, 80),
        create_compliant_rake("R2"),
    ];

    let first = validator
        .validate_plan(&rakes, &ConstraintSet::default(), reference_time())
        .unwrap();
    let second = validator
        .validate_plan(&rakes, &ConstraintSet::default(), reference_time())
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.total_penalty.to_bits(), second.total_penalty.to_bits());
}

// ==========================================
// 边界与异常数据
// ==========================================

#[test]
fn test_empty_plan() {
    let validator = PlanValidator::new();
    let result = validator
        .validate_plan(&[], &ConstraintSet::default(), reference_time())
        .unwrap();

    assert!(result.is_valid);
    assert_eq!(result.feasibility_score, 100);
    assert_eq!(result.rake_count, 0);
}

#[test]
fn test_zero_load_rake_produces_note_not_cost_violation() {
    let validator = PlanValidator::new();
    let rake = create_test_rake("R0", 0.0, 0.0, 60_000.0, 10);
    let result = validator
        .validate_plan(&[rake], &ConstraintSet::default(), reference_time())
        .unwrap();

    assert!(result
        .soft_violations
        .iter()
        .all(|v| v.constraint_id != ConstraintId::MaxCostPerTonne));
    assert_eq!(result.data_quality_notes.len(), 1);
    assert_eq!(result.data_quality_notes[0].rake_id, "R0");
    // 0 吨仍低于最小编组吨位
    assert_eq!(ids(&result.hard_violations), vec![ConstraintId::MinRakeSize]);
}

#[test]
fn test_invalid_override_fails_the_call() {
    let validator = PlanValidator::new();
    let constraints = ConstraintSet {
        min_utilization: Some(-10.0),
        ..Default::default()
    };

    let err = validator
        .validate_plan(&[create_compliant_rake("R1")], &constraints, reference_time())
        .unwrap_err();
    assert!(matches!(
        err,
        crate::config::ConstraintConfigError::NonPositive {
            field: ConstraintId::MinUtilization,
            ..
        }
    ));
}

#[test]
fn test_overrides_change_outcome() {
    let validator = PlanValidator::new();
    let constraints = ConstraintSet {
        min_rake_size: Some(45.0),
        max_rakes_per_day: Some(1.0),
        ..Default::default()
    };
    let rakes = vec![
        create_test_rake("R1", 50.0, 85.0, 40_000.0, 20),
        create_compliant_rake("R2"),
    ];

    let result = validator
        .validate_plan(&rakes, &constraints, reference_time())
        .unwrap();

    assert!(result.is_valid);
    assert_eq!(ids(&result.soft_violations), vec![ConstraintId::MaxRakesPerDay]);
    assert!((result.total_penalty - 5000.0).abs() < 1e-9);
}

#[test]
fn test_invariants_hold() {
    let validator = PlanValidator::new();
    let rakes = vec![
        create_test_rake("R1", 50.0, 60.0, 60_000.0, 80),
        create_test_rake("R2", 100.0, 65.0, 200_000.0, 60),
        create_compliant_rake("R3"),
    ];

    let result = validator
        .validate_plan(&rakes, &ConstraintSet::default(), reference_time())
        .unwrap();

    assert_eq!(result.is_valid, result.hard_violations.is_empty());
    let sum: f64 = result.soft_violations.iter().map(|v| v.penalty).sum();
    assert!((result.total_penalty - sum).abs() < 1e-9);
    assert!(result.hard_violations.iter().all(|v| v.penalty == 0.0));
    assert_eq!(
        result.feasibility_score,
        FeasibilityScorer::score(result.hard_violations.len(), result.soft_violations.len())
    );
}
