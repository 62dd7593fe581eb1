// ==========================================
// 铁路装车编组计划 - 计划校验 API
// ==========================================
// 职责: 请求边界校验 → 约束叠加 → 计划校验 → 放宽建议 → 文本报告
// 红线: 参考时间由请求携带, API 层不读系统时钟
// 红线: 引擎不接收未经边界校验的编组
// ==========================================

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::api::dto::{ValidationRequest, ValidationResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::config::catalog::resolve_constraints;
use crate::domain::constraint::ConstraintSet;
use crate::domain::rake::Rake;
use crate::domain::violation::{RelaxationSuggestion, Violation};
use crate::engine::{PlanValidator, RelaxationAdvisor, ViolationReporter};
use crate::i18n;

// ==========================================
// ValidationApi - 计划校验 API
// ==========================================

/// 计划校验API
///
/// 职责：
/// 1. 请求边界校验 (编组ID、数值合法性)
/// 2. 请求覆写叠加站点默认约束
/// 3. 调用引擎校验并生成放宽建议与报告
pub struct ValidationApi {
    default_constraints: ConstraintSet,
}

impl ValidationApi {
    /// 使用约束目录默认值
    pub fn new() -> Self {
        Self::with_default_constraints(ConstraintSet::default())
    }

    /// 使用站点默认约束 (通常来自约束配置文件)
    pub fn with_default_constraints(default_constraints: ConstraintSet) -> Self {
        Self {
            default_constraints,
        }
    }

    pub fn default_constraints(&self) -> &ConstraintSet {
        &self.default_constraints
    }

    /// 校验计划
    ///
    /// # 返回
    /// - Ok(ValidationResponse): 校验结果 + 放宽建议 (仅无效计划) + 文本报告
    /// - Err(ApiError::InvalidInput): 编组数据非法
    /// - Err(ApiError::ConstraintConfig): 约束覆写无效
    pub fn validate(&self, request: ValidationRequest) -> ApiResult<ValidationResponse> {
        validate_rakes(&request.rakes)?;

        let locale = i18n::normalize_locale(
            request
                .locale
                .as_deref()
                .unwrap_or(i18n::DEFAULT_LOCALE),
        );
        let reference_time = request.reference_time;
        let constraints = request.constraints.overlay(&self.default_constraints);

        debug!(
            rake_count = request.rakes.len(),
            locale = locale,
            reference_time = %reference_time,
            "收到计划校验请求"
        );

        let result = PlanValidator::with_locale(locale).validate_plan(
            &request.rakes,
            &constraints,
            reference_time,
        )?;

        let suggestions = if result.is_valid {
            Vec::new()
        } else {
            let violations: Vec<Violation> = result.all_violations().cloned().collect();
            RelaxationAdvisor::with_locale(locale).suggest(&violations)
        };
        let summary = ViolationReporter::with_locale(locale).summarize(&result);

        info!(
            rake_count = result.rake_count,
            is_valid = result.is_valid,
            feasibility_score = result.feasibility_score,
            suggestions = suggestions.len(),
            "计划校验请求完成"
        );

        Ok(ValidationResponse {
            result,
            suggestions,
            summary,
            locale: locale.to_string(),
        })
    }

    /// 校验 JSON 请求, 返回 JSON 响应
    pub fn validate_json(&self, request_json: &str) -> ApiResult<String> {
        let request: ValidationRequest = serde_json::from_str(request_json)?;
        let response = self.validate(request)?;
        serde_json::to_string(&response).map_err(|e| ApiError::SerializationError(e.to_string()))
    }

    /// 针对给定违规生成放宽建议 (默认语言)
    pub fn suggest(&self, violations: &[Violation]) -> Vec<RelaxationSuggestion> {
        RelaxationAdvisor::new().suggest(violations)
    }

    /// 应用放宽建议
    ///
    /// 以 "请求覆写 + 站点默认" 为基准放宽, 返回的约束集经过解析校验
    pub fn relax(
        &self,
        constraints: ConstraintSet,
        relaxations: &[RelaxationSuggestion],
    ) -> ApiResult<ConstraintSet> {
        let base = constraints.overlay(&self.default_constraints);
        let relaxed = RelaxationAdvisor::apply(&base, relaxations);

        resolve_constraints(&relaxed).map_err(|e| {
            warn!(error = %e, "放宽后的约束集无效");
            ApiError::from(e)
        })?;

        Ok(relaxed)
    }
}

impl Default for ValidationApi {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 边界校验
// ==========================================

fn validate_rakes(rakes: &[Rake]) -> ApiResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(rakes.len());

    for rake in rakes {
        if rake.rake_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("编组ID不能为空".to_string()));
        }
        if !seen.insert(rake.rake_id.as_str()) {
            return Err(ApiError::InvalidInput(format!(
                "编组ID重复: {}",
                rake.rake_id
            )));
        }
        validate_rake_numbers(rake)?;
    }

    Ok(())
}

fn validate_rake_numbers(rake: &Rake) -> ApiResult<()> {
    let mut fields = vec![
        ("total_load_t", rake.total_load_t),
        ("utilization_pct", rake.utilization_pct),
        ("cost", rake.cost),
    ];
    if let Some(distance) = rake.distance_km {
        fields.push(("distance_km", distance));
    }

    for (field, value) in fields {
        if !value.is_finite() {
            return Err(ApiError::InvalidInput(format!(
                "编组{}字段{}非有限数值: {}",
                rake.rake_id, field, value
            )));
        }
        if value < 0.0 && field != "utilization_pct" {
            return Err(ApiError::InvalidInput(format!(
                "编组{}字段{}不能为负数: {}",
                rake.rake_id, field, value
            )));
        }
    }

    Ok(())
}
