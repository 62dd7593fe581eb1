// ==========================================
// 铁路装车编组计划 - 约束放宽建议
// ==========================================
// 职责: 针对违规集合给出阈值放宽建议, 并生成放宽后的新约束集
// 红线: 不修改输入约束集
// 红线: 无放宽步长的约束不产生建议 (不报错)
// ==========================================

use crate::config::catalog::{default_threshold, relaxation_step};
use crate::domain::constraint::ConstraintSet;
use crate::domain::types::{ConstraintId, ThresholdBound};
use crate::domain::violation::{RelaxationSuggestion, Violation};
use crate::i18n::{self, format_amount};
use tracing::{debug, info, warn};

// ==========================================
// RelaxationAdvisor - 放宽建议器
// ==========================================
pub struct RelaxationAdvisor {
    locale: String,
}

impl RelaxationAdvisor {
    pub fn new() -> Self {
        Self::with_locale(i18n::DEFAULT_LOCALE)
    }

    pub fn with_locale(locale: &str) -> Self {
        Self {
            locale: i18n::normalize_locale(locale).to_string(),
        }
    }

    /// 生成放宽建议
    ///
    /// # 规则
    /// - 每个约束最多一条建议, 按首次出现顺序
    /// - 放宽幅度取约束目录中的固定步长
    /// - 无步长的约束 (期望送达/装车时段/订单量) 跳过
    pub fn suggest(&self, violations: &[Violation]) -> Vec<RelaxationSuggestion> {
        // (约束, 违规条数), 保持首次出现顺序
        let mut counts: Vec<(ConstraintId, usize)> = Vec::new();
        for v in violations {
            match counts.iter_mut().find(|(id, _)| *id == v.constraint_id) {
                Some((_, count)) => *count += 1,
                None => counts.push((v.constraint_id, 1)),
            }
        }

        let suggestions: Vec<RelaxationSuggestion> = counts
            .into_iter()
            .filter_map(|(id, count)| {
                let Some(amount) = relaxation_step(id) else {
                    debug!(constraint_id = %id, "该约束不提供放宽建议");
                    return None;
                };
                Some(self.build_suggestion(id, amount, count))
            })
            .collect();

        info!(
            violations = violations.len(),
            suggestions = suggestions.len(),
            "放宽建议生成完成"
        );

        suggestions
    }

    fn build_suggestion(&self, id: ConstraintId, amount: f64, count: usize) -> RelaxationSuggestion {
        let amount_text = format_amount(amount);
        let count_text = count.to_string();
        let impact = i18n::t_in(
            &self.locale,
            &format!("relaxation.{}.impact", id.i18n_key()),
            &[("amount", amount_text.as_str()), ("count", count_text.as_str())],
        );

        RelaxationSuggestion {
            constraint_id: id,
            amount,
            impact,
            addressed_violations: count,
        }
    }

    /// 应用放宽建议, 返回新的约束集
    ///
    /// # 规则
    /// - 下限阈值减去放宽幅度, 上限阈值加上放宽幅度
    /// - 基准值: 约束集已有覆写, 否则取约束目录默认值
    /// - 无默认值且未覆写的约束 (费用上限) 保持未设置
    /// - 放宽幅度必须为有限正数, 否则跳过该条
    ///
    /// # 注意
    /// 结果未经解析校验; 多次放宽可能使下限降到 0 以下, 由下一次解析拒绝
    pub fn apply(
        constraint_set: &ConstraintSet,
        relaxations: &[RelaxationSuggestion],
    ) -> ConstraintSet {
        let mut relaxed = constraint_set.clone();

        for relaxation in relaxations {
            let id = relaxation.constraint_id;

            if !relaxation.amount.is_finite() || relaxation.amount <= 0.0 {
                warn!(constraint_id = %id, amount = relaxation.amount, "放宽幅度无效, 已跳过");
                continue;
            }

            let Some(base) = relaxed.override_value(id).or_else(|| default_threshold(id)) else {
                debug!(constraint_id = %id, "约束未设置且无默认值, 跳过放宽");
                continue;
            };

            let value = match id.bound() {
                ThresholdBound::Lower => base - relaxation.amount,
                ThresholdBound::Upper => base + relaxation.amount,
            };

            if relaxed.set_override(id, value) {
                info!(constraint_id = %id, from = base, to = value, "约束已放宽");
            } else {
                debug!(constraint_id = %id, "该约束不是标量阈值, 跳过放宽");
            }
        }

        relaxed
    }
}

impl Default for RelaxationAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Severity;

    fn violation(id: ConstraintId, rake_id: &str) -> Violation {
        match id.kind() {
            crate::domain::types::ViolationKind::Hard => Violation::hard(
                id,
                Severity::Critical,
                rake_id,
                String::new(),
                String::new(),
            ),
            crate::domain::types::ViolationKind::Soft => Violation::soft(
                id,
                Severity::Low,
                vec![rake_id.to_string()],
                100.0,
                String::new(),
                String::new(),
            ),
        }
    }

    #[test]
    fn test_suggest_known_constraints() {
        let advisor = RelaxationAdvisor::new();
        let violations = vec![
            violation(ConstraintId::MinRakeSize, "R1"),
            violation(ConstraintId::MaxDeliveryHours, "R1"),
            violation(ConstraintId::MinRakeSize, "R2"),
            violation(ConstraintId::MinUtilization, "R2"),
        ];

        let suggestions = advisor.suggest(&violations);
        let summary: Vec<(ConstraintId, f64, usize)> = suggestions
            .iter()
            .map(|s| (s.constraint_id, s.amount, s.addressed_violations))
            .collect();

        assert_eq!(
            summary,
            vec![
                (ConstraintId::MinRakeSize, 5.0, 2),
                (ConstraintId::MaxDeliveryHours, 12.0, 1),
                (ConstraintId::MinUtilization, 5.0, 1),
            ]
        );
        assert!(suggestions[0].impact.contains('5'));
        assert!(suggestions[0].impact.contains('2'));
    }

    #[test]
    fn test_constraints_without_step_are_omitted() {
        let advisor = RelaxationAdvisor::new();
        let violations = vec![
            violation(ConstraintId::PreferredDeliveryHours, "R1"),
            violation(ConstraintId::PreferredLoadingHours, "R1"),
        ];
        assert!(advisor.suggest(&violations).is_empty());
        assert!(advisor.suggest(&[]).is_empty());
    }

    #[test]
    fn test_apply_uses_defaults_and_direction() {
        let input = ConstraintSet {
            max_delivery_hours: Some(60.0),
            ..Default::default()
        };
        let relaxations = vec![
            RelaxationSuggestion::new(ConstraintId::MinRakeSize, 5.0),
            RelaxationSuggestion::new(ConstraintId::MaxDeliveryHours, 12.0),
            RelaxationSuggestion::new(ConstraintId::MinUtilization, 5.0),
            RelaxationSuggestion::new(ConstraintId::MaxRakesPerDay, 2.0),
        ];

        let relaxed = RelaxationAdvisor::apply(&input, &relaxations);

        assert_eq!(relaxed.min_rake_size, Some(50.0));
        assert_eq!(relaxed.max_delivery_hours, Some(72.0));
        assert_eq!(relaxed.min_utilization, Some(65.0));
        assert_eq!(relaxed.max_rakes_per_day, Some(12.0));
        // 输入不变
        assert_eq!(input.min_rake_size, None);
        assert_eq!(input.max_delivery_hours, Some(60.0));
    }

    #[test]
    fn test_apply_skips_unset_cost_ceiling_and_invalid_amounts() {
        let input = ConstraintSet::default();
        let relaxations = vec![
            RelaxationSuggestion::new(ConstraintId::MaxCost, 10_000.0),
            RelaxationSuggestion::new(ConstraintId::MinRakeSize, -5.0),
            RelaxationSuggestion::new(ConstraintId::PreferredLoadingHours, 1.0),
        ];

        let relaxed = RelaxationAdvisor::apply(&input, &relaxations);
        assert!(relaxed.is_empty());
    }

    #[test]
    fn test_apply_is_cumulative_for_repeated_entries() {
        let relaxations = vec![
            RelaxationSuggestion::new(ConstraintId::MinRakeSize, 5.0),
            RelaxationSuggestion::new(ConstraintId::MinRakeSize, 5.0),
        ];
        let relaxed = RelaxationAdvisor::apply(&ConstraintSet::default(), &relaxations);
        assert_eq!(relaxed.min_rake_size, Some(45.0));
    }
}
