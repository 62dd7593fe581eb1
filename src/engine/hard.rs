// ==========================================
// 铁路装车编组计划 - 硬约束校验器
// ==========================================
// 红线: 硬约束违规 => 计划无效, 不计罚金
// 红线: 参考时间由调用方传入, 引擎内不读系统时钟
// ==========================================
// 输入: 单个编组 + 生效阈值表 + 参考时间
// 输出: 硬违规列表 (各项校验相互独立, 可同时触发)
// ==========================================

use crate::domain::constraint::EffectiveConstraints;
use crate::domain::rake::Rake;
use crate::domain::types::{ConstraintId, Severity};
use crate::domain::violation::Violation;
use crate::i18n::{self, format_amount};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

// ==========================================
// HardConstraintValidator - 硬约束校验器
// ==========================================
// 无状态, 仅持有输出语言
pub struct HardConstraintValidator {
    locale: String,
}

impl HardConstraintValidator {
    pub fn new() -> Self {
        Self::with_locale(i18n::DEFAULT_LOCALE)
    }

    pub fn with_locale(locale: &str) -> Self {
        Self {
            locale: i18n::normalize_locale(locale).to_string(),
        }
    }

    /// 校验单个编组的硬约束
    ///
    /// # 校验顺序
    /// 1. MIN_RAKE_SIZE: 载重低于最小编组吨位
    /// 2. MAX_RAKE_SIZE: 载重超过最大编组吨位
    /// 3. MAX_DELIVERY_HOURS: 送达时限超限
    /// 4. MAX_COST: 费用超过上限 (仅在配置了上限时)
    /// 5. MAX_DISTANCE: 运距超限 (仅在编组携带运距时)
    pub fn validate(
        &self,
        rake: &Rake,
        constraints: &EffectiveConstraints,
        reference_time: DateTime<Utc>,
    ) -> Vec<Violation> {
        let violations: Vec<Violation> = [
            self.check_min_rake_size(rake, constraints),
            self.check_max_rake_size(rake, constraints),
            self.check_delivery_hours(rake, constraints, reference_time),
            self.check_max_cost(rake, constraints),
            self.check_max_distance(rake, constraints),
        ]
        .into_iter()
        .flatten()
        .collect();

        if violations.is_empty() {
            debug!(rake_id = %rake.rake_id, "硬约束校验通过");
        } else {
            warn!(
                rake_id = %rake.rake_id,
                violations = violations.len(),
                constraint_ids = ?violations.iter().map(|v| v.constraint_id).collect::<Vec<_>>(),
                "检测到硬约束违规"
            );
        }

        violations
    }

    fn check_min_rake_size(&self, rake: &Rake, c: &EffectiveConstraints) -> Option<Violation> {
        if rake.total_load_t >= c.min_rake_size {
            return None;
        }
        Some(self.violation(
            ConstraintId::MinRakeSize,
            Severity::Critical,
            rake,
            rake.total_load_t,
            c.min_rake_size,
        ))
    }

    fn check_max_rake_size(&self, rake: &Rake, c: &EffectiveConstraints) -> Option<Violation> {
        if rake.total_load_t <= c.max_rake_size {
            return None;
        }
        Some(self.violation(
            ConstraintId::MaxRakeSize,
            Severity::Critical,
            rake,
            rake.total_load_t,
            c.max_rake_size,
        ))
    }

    fn check_delivery_hours(
        &self,
        rake: &Rake,
        c: &EffectiveConstraints,
        reference_time: DateTime<Utc>,
    ) -> Option<Violation> {
        let hours = rake.hours_until_delivery(reference_time);
        if hours <= c.max_delivery_hours {
            return None;
        }
        Some(self.violation(
            ConstraintId::MaxDeliveryHours,
            Severity::Critical,
            rake,
            hours,
            c.max_delivery_hours,
        ))
    }

    fn check_max_cost(&self, rake: &Rake, c: &EffectiveConstraints) -> Option<Violation> {
        let limit = c.max_cost?;
        if rake.cost <= limit {
            return None;
        }
        Some(self.violation(ConstraintId::MaxCost, Severity::High, rake, rake.cost, limit))
    }

    fn check_max_distance(&self, rake: &Rake, c: &EffectiveConstraints) -> Option<Violation> {
        let distance = rake.distance_km?;
        if distance <= c.max_distance {
            return None;
        }
        Some(self.violation(
            ConstraintId::MaxDistance,
            Severity::High,
            rake,
            distance,
            c.max_distance,
        ))
    }

    fn violation(
        &self,
        id: ConstraintId,
        severity: Severity,
        rake: &Rake,
        actual: f64,
        limit: f64,
    ) -> Violation {
        let key = id.i18n_key();
        let actual = format_amount(actual);
        let limit = format_amount(limit);
        let args = [
            ("rake_id", rake.rake_id.as_str()),
            ("actual", actual.as_str()),
            ("limit", limit.as_str()),
        ];

        Violation::hard(
            id,
            severity,
            &rake.rake_id,
            i18n::t_in(&self.locale, &format!("hard.{}.message", key), &args),
            i18n::t_in(&self.locale, &format!("hard.{}.fix", key), &args),
        )
    }
}

impl Default for HardConstraintValidator {
    fn default() -> Self {
        Self::new()
    }
}
