// ==========================================
// 铁路装车编组计划 - 软约束校验器
// ==========================================
// 红线: 软约束违规只累计罚金, 不影响计划有效性
// 红线: 总载重为 0 时跳过吨运费校验, 记录数据质量提示, 不做除法
// ==========================================
// 输入: 单个编组 + 生效阈值表 + 参考时间
// 输出: 软违规列表 (含罚金) + 数据质量提示
// ==========================================

use crate::config::catalog::{
    DELIVERY_PENALTY_PER_HOUR, LOADING_WINDOW_PENALTY_PER_HOUR, PREFERRED_DELIVERY_HOURS,
    UTILIZATION_PENALTY_PER_POINT,
};
use crate::domain::constraint::EffectiveConstraints;
use crate::domain::rake::Rake;
use crate::domain::types::{ConstraintId, Severity};
use crate::domain::violation::{DataQualityNote, Violation};
use crate::i18n::{self, format_amount};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

// ==========================================
// SoftCheckOutcome - 单编组软约束校验结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoftCheckOutcome {
    pub violations: Vec<Violation>,
    pub notes: Vec<DataQualityNote>,
}

impl SoftCheckOutcome {
    pub fn total_penalty(&self) -> f64 {
        self.violations.iter().map(|v| v.penalty).sum()
    }
}

// ==========================================
// SoftConstraintValidator - 软约束校验器
// ==========================================
pub struct SoftConstraintValidator {
    locale: String,
}

impl SoftConstraintValidator {
    pub fn new() -> Self {
        Self::with_locale(i18n::DEFAULT_LOCALE)
    }

    pub fn with_locale(locale: &str) -> Self {
        Self {
            locale: i18n::normalize_locale(locale).to_string(),
        }
    }

    /// 校验单个编组的软约束, 只返回违规
    pub fn validate(
        &self,
        rake: &Rake,
        constraints: &EffectiveConstraints,
        reference_time: DateTime<Utc>,
    ) -> Vec<Violation> {
        self.check(rake, constraints, reference_time).violations
    }

    /// 校验单个编组的软约束
    ///
    /// # 校验顺序
    /// 1. MIN_UTILIZATION: 装载率不足, 罚金 = 差值 × 100 / 百分点
    /// 2. MAX_COST_PER_TONNE: 吨运费超限, 罚金 = 超出吨运费 × 载重
    /// 3. PREFERRED_DELIVERY_HOURS: 超过 48 小时期望时限, 罚金 = 超出小时 × 1000
    /// 4. PREFERRED_LOADING_HOURS: 装车时间偏离期望时段, 罚金 = 偏离小时 (按已开始整小时计) × 500
    pub fn check(
        &self,
        rake: &Rake,
        constraints: &EffectiveConstraints,
        reference_time: DateTime<Utc>,
    ) -> SoftCheckOutcome {
        let mut outcome = SoftCheckOutcome::default();

        if let Some(v) = self.check_utilization(rake, constraints) {
            outcome.violations.push(v);
        }

        match rake.cost_per_tonne() {
            Some(cost_per_tonne) => {
                if let Some(v) = self.check_cost_per_tonne(rake, cost_per_tonne, constraints) {
                    outcome.violations.push(v);
                }
            }
            None => {
                warn!(
                    rake_id = %rake.rake_id,
                    cost = rake.cost,
                    "编组总载重为 0, 跳过吨运费校验"
                );
                outcome.notes.push(DataQualityNote {
                    rake_id: rake.rake_id.clone(),
                    check: ConstraintId::MaxCostPerTonne,
                    message: i18n::t_in(
                        &self.locale,
                        "data_quality.zero_load_cost_per_tonne",
                        &[("rake_id", rake.rake_id.as_str())],
                    ),
                });
            }
        }

        if let Some(v) = self.check_delivery_preference(rake, reference_time) {
            outcome.violations.push(v);
        }

        if let Some(v) = self.check_loading_window(rake, constraints) {
            outcome.violations.push(v);
        }

        debug!(
            rake_id = %rake.rake_id,
            violations = outcome.violations.len(),
            notes = outcome.notes.len(),
            penalty = outcome.total_penalty(),
            "软约束校验完成"
        );

        outcome
    }

    fn check_utilization(&self, rake: &Rake, c: &EffectiveConstraints) -> Option<Violation> {
        if rake.utilization_pct >= c.min_utilization {
            return None;
        }
        let shortfall = c.min_utilization - rake.utilization_pct;
        Some(self.violation(
            ConstraintId::MinUtilization,
            Severity::Medium,
            rake,
            shortfall * UTILIZATION_PENALTY_PER_POINT,
            rake.utilization_pct,
            c.min_utilization,
        ))
    }

    fn check_cost_per_tonne(
        &self,
        rake: &Rake,
        cost_per_tonne: f64,
        c: &EffectiveConstraints,
    ) -> Option<Violation> {
        if cost_per_tonne <= c.max_cost_per_tonne {
            return None;
        }
        let excess = cost_per_tonne - c.max_cost_per_tonne;
        Some(self.violation(
            ConstraintId::MaxCostPerTonne,
            Severity::Low,
            rake,
            excess * rake.total_load_t,
            cost_per_tonne,
            c.max_cost_per_tonne,
        ))
    }

    fn check_delivery_preference(
        &self,
        rake: &Rake,
        reference_time: DateTime<Utc>,
    ) -> Option<Violation> {
        let hours = rake.hours_until_delivery(reference_time);
        if hours <= PREFERRED_DELIVERY_HOURS {
            return None;
        }
        Some(self.violation(
            ConstraintId::PreferredDeliveryHours,
            Severity::Low,
            rake,
            (hours - PREFERRED_DELIVERY_HOURS) * DELIVERY_PENALTY_PER_HOUR,
            hours,
            PREFERRED_DELIVERY_HOURS,
        ))
    }

    fn check_loading_window(&self, rake: &Rake, c: &EffectiveConstraints) -> Option<Violation> {
        let (loading_at, hour) = (rake.loading_at?, rake.loading_hour_of_day()?);
        let window = c.preferred_loading_hours;
        let outside = window.hours_outside(hour);
        if outside <= 0.0 {
            return None;
        }

        let actual = loading_at.format("%H:%M").to_string();
        let start = format_hour(window.start_hour);
        let end = format_hour(window.end_hour);
        let args = [
            ("rake_id", rake.rake_id.as_str()),
            ("actual", actual.as_str()),
            ("start", start.as_str()),
            ("end", end.as_str()),
        ];

        Some(Violation::soft(
            ConstraintId::PreferredLoadingHours,
            Severity::Low,
            vec![rake.rake_id.clone()],
            outside * LOADING_WINDOW_PENALTY_PER_HOUR,
            i18n::t_in(&self.locale, "soft.preferred_loading_hours.message", &args),
            i18n::t_in(&self.locale, "soft.preferred_loading_hours.fix", &args),
        ))
    }

    fn violation(
        &self,
        id: ConstraintId,
        severity: Severity,
        rake: &Rake,
        penalty: f64,
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

        Violation::soft(
            id,
            severity,
            vec![rake.rake_id.clone()],
            penalty,
            i18n::t_in(&self.locale, &format!("soft.{}.message", key), &args),
            i18n::t_in(&self.locale, &format!("soft.{}.fix", key), &args),
        )
    }
}

impl Default for SoftConstraintValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// 小时数转 HH:MM (如 6.5 -> "06:30")
fn format_hour(hour: f64) -> String {
    let total_minutes = (hour * 60.0).round() as i64;
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}
