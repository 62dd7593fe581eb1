// ==========================================
// 铁路装车编组计划 - 计划校验器
// ==========================================
// 输入: 编组列表 + 约束覆写集 + 参考时间
// 输出: ValidationResult (硬/软违规 + 总罚金 + 可行性评分)
// ==========================================
// 红线: 参考时间每次调用只取一次, 贯穿所有子校验
// 红线: 输出顺序与输入编组顺序一致 (并行校验按下标收集)
// 红线: 不修改输入, 不持有跨调用状态
// ==========================================

use crate::config::catalog::{resolve_constraints, EXCESS_RAKE_PENALTY};
use crate::config::error::ConfigResult;
use crate::domain::constraint::{ConstraintSet, EffectiveConstraints};
use crate::domain::rake::Rake;
use crate::domain::types::{ConstraintId, Severity};
use crate::domain::violation::{ValidationResult, Violation};
use crate::engine::feasibility::FeasibilityScorer;
use crate::engine::hard::HardConstraintValidator;
use crate::engine::soft::{SoftCheckOutcome, SoftConstraintValidator};
use crate::i18n::{self, format_amount};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

// 单编组校验结果
struct RakeOutcome {
    hard: Vec<Violation>,
    soft: SoftCheckOutcome,
}

// ==========================================
// PlanValidator - 计划校验器
// ==========================================
pub struct PlanValidator {
    hard: HardConstraintValidator,
    soft: SoftConstraintValidator,
    locale: String,
}

impl PlanValidator {
    pub fn new() -> Self {
        Self::with_locale(i18n::DEFAULT_LOCALE)
    }

    pub fn with_locale(locale: &str) -> Self {
        let locale = i18n::normalize_locale(locale);
        Self {
            hard: HardConstraintValidator::with_locale(locale),
            soft: SoftConstraintValidator::with_locale(locale),
            locale: locale.to_string(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// 校验整个计划
    ///
    /// # 返回
    /// - Ok(ValidationResult): 校验结果
    /// - Err: 约束覆写无效 (负数/非有限数/区间倒置等)
    pub fn validate_plan(
        &self,
        rakes: &[Rake],
        constraints: &ConstraintSet,
        reference_time: DateTime<Utc>,
    ) -> ConfigResult<ValidationResult> {
        let effective = resolve_constraints(constraints).map_err(|e| {
            warn!(error = %e, rake_count = rakes.len(), "约束配置无效, 拒绝校验计划");
            e
        })?;
        Ok(self.validate_with(rakes, &effective, reference_time))
    }

    /// 使用已解析的阈值表校验计划
    pub fn validate_with(
        &self,
        rakes: &[Rake],
        constraints: &EffectiveConstraints,
        reference_time: DateTime<Utc>,
    ) -> ValidationResult {
        debug!(
            rake_count = rakes.len(),
            reference_time = %reference_time,
            "开始校验计划"
        );

        // 1. 逐编组校验 (顺序与输入一致)
        let outcomes = self.validate_rakes(rakes, constraints, reference_time);

        // 2. 按编组顺序拼接
        let mut hard_violations = Vec::new();
        let mut soft_violations = Vec::new();
        let mut data_quality_notes = Vec::new();
        for outcome in outcomes {
            hard_violations.extend(outcome.hard);
            soft_violations.extend(outcome.soft.violations);
            data_quality_notes.extend(outcome.soft.notes);
        }

        // 3. 计划级软约束: 每日发运列数
        if let Some(v) = self.check_rakes_per_day(rakes, constraints) {
            soft_violations.push(v);
        }

        // 4. 汇总
        let total_penalty: f64 = soft_violations.iter().map(|v| v.penalty).sum();
        let feasibility_score =
            FeasibilityScorer::score(hard_violations.len(), soft_violations.len());
        let is_valid = hard_violations.is_empty();

        if is_valid {
            info!(
                rake_count = rakes.len(),
                soft_violations = soft_violations.len(),
                total_penalty = total_penalty,
                feasibility_score = feasibility_score,
                "计划校验通过"
            );
        } else {
            warn!(
                rake_count = rakes.len(),
                hard_violations = hard_violations.len(),
                soft_violations = soft_violations.len(),
                total_penalty = total_penalty,
                feasibility_score = feasibility_score,
                "计划存在硬约束违规"
            );
        }

        ValidationResult {
            is_valid,
            hard_violations,
            soft_violations,
            total_penalty,
            feasibility_score,
            data_quality_notes,
            rake_count: rakes.len(),
            reference_time,
        }
    }

    fn validate_rake(
        &self,
        rake: &Rake,
        constraints: &EffectiveConstraints,
        reference_time: DateTime<Utc>,
    ) -> RakeOutcome {
        RakeOutcome {
            hard: self.hard.validate(rake, constraints, reference_time),
            soft: self.soft.check(rake, constraints, reference_time),
        }
    }

    #[cfg(feature = "parallel")]
    fn validate_rakes(
        &self,
        rakes: &[Rake],
        constraints: &EffectiveConstraints,
        reference_time: DateTime<Utc>,
    ) -> Vec<RakeOutcome> {
        use rayon::prelude::*;

        // 索引并行迭代器的 collect 保持输入顺序
        rakes
            .par_iter()
            .map(|rake| self.validate_rake(rake, constraints, reference_time))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn validate_rakes(
        &self,
        rakes: &[Rake],
        constraints: &EffectiveConstraints,
        reference_time: DateTime<Utc>,
    ) -> Vec<RakeOutcome> {
        rakes
            .iter()
            .map(|rake| self.validate_rake(rake, constraints, reference_time))
            .collect()
    }

    /// 每日发运列数校验
    ///
    /// 超出部分每列罚金 5000, 影响范围为计划内全部编组
    fn check_rakes_per_day(
        &self,
        rakes: &[Rake],
        constraints: &EffectiveConstraints,
    ) -> Option<Violation> {
        let rake_count = rakes.len() as f64;
        if rake_count <= constraints.max_rakes_per_day {
            return None;
        }

        let excess = rake_count - constraints.max_rakes_per_day;
        let actual = format_amount(rake_count);
        let limit = format_amount(constraints.max_rakes_per_day);
        let excess_text = format_amount(excess);
        let args = [
            ("actual", actual.as_str()),
            ("limit", limit.as_str()),
            ("excess", excess_text.as_str()),
        ];

        warn!(
            rake_count = rakes.len(),
            max_rakes_per_day = constraints.max_rakes_per_day,
            "计划发运列数超过每日上限"
        );

        Some(Violation::soft(
            ConstraintId::MaxRakesPerDay,
            Severity::Medium,
            rakes.iter().map(|r| r.rake_id.clone()).collect(),
            excess * EXCESS_RAKE_PENALTY,
            i18n::t_in(&self.locale, "soft.max_rakes_per_day.message", &args),
            i18n::t_in(&self.locale, "soft.max_rakes_per_day.fix", &args),
        ))
    }
}

impl Default for PlanValidator {
    fn default() -> Self {
        Self::new()
    }
}
