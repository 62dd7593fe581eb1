// ==========================================
// 铁路装车编组计划 - 约束目录
// ==========================================
// 职责: 默认阈值 + 罚金/评分/放宽常量的唯一出处
// 规则: 生效阈值 = 覆写值 ?? 默认值; 覆写值必须为正的有限数
// ==========================================

use crate::config::error::{ConfigResult, ConstraintConfigError};
use crate::domain::constraint::{ConstraintSet, EffectiveConstraints, LoadingWindow};
use crate::domain::types::ConstraintId;
use tracing::{debug, warn};

// ==========================================
// 默认阈值 - 硬约束
// ==========================================
pub const DEFAULT_MIN_RAKE_SIZE_T: f64 = 55.0;
pub const DEFAULT_MAX_RAKE_SIZE_T: f64 = 90.0;
pub const DEFAULT_MIN_ORDER_QTY: f64 = 10.0;
pub const DEFAULT_MAX_ORDER_QTY: f64 = 5000.0;
pub const DEFAULT_MAX_DELIVERY_HOURS: f64 = 72.0;
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 1000.0;

// ==========================================
// 默认阈值 - 软约束
// ==========================================
pub const DEFAULT_MIN_UTILIZATION_PCT: f64 = 70.0;
pub const DEFAULT_MAX_COST_PER_TONNE: f64 = 1000.0;
pub const DEFAULT_LOADING_WINDOW: LoadingWindow = LoadingWindow::new(6.0, 22.0);
pub const DEFAULT_MAX_RAKES_PER_DAY: f64 = 10.0;

/// 默认阈值表 (费用上限无默认值)
pub const DEFAULT_CONSTRAINTS: EffectiveConstraints = EffectiveConstraints {
    min_rake_size: DEFAULT_MIN_RAKE_SIZE_T,
    max_rake_size: DEFAULT_MAX_RAKE_SIZE_T,
    min_order_qty: DEFAULT_MIN_ORDER_QTY,
    max_order_qty: DEFAULT_MAX_ORDER_QTY,
    max_delivery_hours: DEFAULT_MAX_DELIVERY_HOURS,
    max_distance: DEFAULT_MAX_DISTANCE_KM,
    max_cost: None,
    min_utilization: DEFAULT_MIN_UTILIZATION_PCT,
    max_cost_per_tonne: DEFAULT_MAX_COST_PER_TONNE,
    preferred_loading_hours: DEFAULT_LOADING_WINDOW,
    max_rakes_per_day: DEFAULT_MAX_RAKES_PER_DAY,
};

// ==========================================
// 罚金系数 (货币单位)
// ==========================================
pub const UTILIZATION_PENALTY_PER_POINT: f64 = 100.0; // 每低于目标 1 个百分点
pub const PREFERRED_DELIVERY_HOURS: f64 = 48.0; // 期望送达时限, 不随硬时限覆写
pub const DELIVERY_PENALTY_PER_HOUR: f64 = 1000.0; // 每超出期望时限 1 小时
pub const LOADING_WINDOW_PENALTY_PER_HOUR: f64 = 500.0; // 每偏离装车时段 1 小时
pub const EXCESS_RAKE_PENALTY: f64 = 5000.0; // 每超出每日上限 1 列

// ==========================================
// 可行性评分
// ==========================================
pub const FEASIBILITY_BASE_SCORE: u32 = 100;
pub const HARD_VIOLATION_SCORE_WEIGHT: u32 = 50;
pub const SOFT_VIOLATION_SCORE_WEIGHT: u32 = 5;

// ==========================================
// 放宽步长
// ==========================================
pub const RELAX_MIN_RAKE_SIZE_T: f64 = 5.0;
pub const RELAX_MAX_RAKE_SIZE_T: f64 = 5.0;
pub const RELAX_MAX_DELIVERY_HOURS: f64 = 12.0;
pub const RELAX_MAX_COST: f64 = 10_000.0;
pub const RELAX_MAX_DISTANCE_KM: f64 = 100.0;
pub const RELAX_MIN_UTILIZATION_PCT: f64 = 5.0;
pub const RELAX_MAX_COST_PER_TONNE: f64 = 100.0;
pub const RELAX_MAX_RAKES_PER_DAY: f64 = 2.0;

/// 约束的放宽步长
///
/// # 返回
/// - `None`: 该约束不提供放宽建议 (期望送达/装车时段等固定偏好)
pub fn relaxation_step(id: ConstraintId) -> Option<f64> {
    match id {
        ConstraintId::MinRakeSize => Some(RELAX_MIN_RAKE_SIZE_T),
        ConstraintId::MaxRakeSize => Some(RELAX_MAX_RAKE_SIZE_T),
        ConstraintId::MaxDeliveryHours => Some(RELAX_MAX_DELIVERY_HOURS),
        ConstraintId::MaxCost => Some(RELAX_MAX_COST),
        ConstraintId::MaxDistance => Some(RELAX_MAX_DISTANCE_KM),
        ConstraintId::MinUtilization => Some(RELAX_MIN_UTILIZATION_PCT),
        ConstraintId::MaxCostPerTonne => Some(RELAX_MAX_COST_PER_TONNE),
        ConstraintId::MaxRakesPerDay => Some(RELAX_MAX_RAKES_PER_DAY),
        ConstraintId::MinOrderQty
        | ConstraintId::MaxOrderQty
        | ConstraintId::PreferredDeliveryHours
        | ConstraintId::PreferredLoadingHours => None,
    }
}

/// 标量约束的默认阈值
pub fn default_threshold(id: ConstraintId) -> Option<f64> {
    let d = &DEFAULT_CONSTRAINTS;
    match id {
        ConstraintId::MinRakeSize => Some(d.min_rake_size),
        ConstraintId::MaxRakeSize => Some(d.max_rake_size),
        ConstraintId::MinOrderQty => Some(d.min_order_qty),
        ConstraintId::MaxOrderQty => Some(d.max_order_qty),
        ConstraintId::MaxDeliveryHours => Some(d.max_delivery_hours),
        ConstraintId::MaxDistance => Some(d.max_distance),
        ConstraintId::MaxCost => d.max_cost,
        ConstraintId::MinUtilization => Some(d.min_utilization),
        ConstraintId::MaxCostPerTonne => Some(d.max_cost_per_tonne),
        ConstraintId::MaxRakesPerDay => Some(d.max_rakes_per_day),
        ConstraintId::PreferredDeliveryHours => Some(PREFERRED_DELIVERY_HOURS),
        ConstraintId::PreferredLoadingHours => None,
    }
}

// ==========================================
// 约束解析
// ==========================================

/// 解析约束覆写集为生效阈值表
///
/// # 校验规则
/// 1. 标量覆写必须为有限正数
/// 2. 最小值不得大于最大值 (编组吨位/订单量)
/// 3. 装车时段满足 0 <= start < end <= 24
pub fn resolve_constraints(set: &ConstraintSet) -> ConfigResult<EffectiveConstraints> {
    let d = &DEFAULT_CONSTRAINTS;

    let max_cost = match set.max_cost {
        Some(v) => Some(positive(ConstraintId::MaxCost, v)?),
        None => d.max_cost,
    };

    let effective = EffectiveConstraints {
        min_rake_size: resolve_scalar(ConstraintId::MinRakeSize, set.min_rake_size, d.min_rake_size)?,
        max_rake_size: resolve_scalar(ConstraintId::MaxRakeSize, set.max_rake_size, d.max_rake_size)?,
        min_order_qty: resolve_scalar(ConstraintId::MinOrderQty, set.min_order_qty, d.min_order_qty)?,
        max_order_qty: resolve_scalar(ConstraintId::MaxOrderQty, set.max_order_qty, d.max_order_qty)?,
        max_delivery_hours: resolve_scalar(
            ConstraintId::MaxDeliveryHours,
            set.max_delivery_hours,
            d.max_delivery_hours,
        )?,
        max_distance: resolve_scalar(ConstraintId::MaxDistance, set.max_distance, d.max_distance)?,
        max_cost,
        min_utilization: resolve_scalar(
            ConstraintId::MinUtilization,
            set.min_utilization,
            d.min_utilization,
        )?,
        max_cost_per_tonne: resolve_scalar(
            ConstraintId::MaxCostPerTonne,
            set.max_cost_per_tonne,
            d.max_cost_per_tonne,
        )?,
        preferred_loading_hours: resolve_window(set.preferred_loading_hours)?,
        max_rakes_per_day: resolve_scalar(
            ConstraintId::MaxRakesPerDay,
            set.max_rakes_per_day,
            d.max_rakes_per_day,
        )?,
    };

    ensure_ordered(
        ConstraintId::MinRakeSize,
        effective.min_rake_size,
        ConstraintId::MaxRakeSize,
        effective.max_rake_size,
    )?;
    ensure_ordered(
        ConstraintId::MinOrderQty,
        effective.min_order_qty,
        ConstraintId::MaxOrderQty,
        effective.max_order_qty,
    )?;

    debug!(
        min_rake_size = effective.min_rake_size,
        max_rake_size = effective.max_rake_size,
        max_delivery_hours = effective.max_delivery_hours,
        max_cost = ?effective.max_cost,
        min_utilization = effective.min_utilization,
        max_rakes_per_day = effective.max_rakes_per_day,
        "约束阈值解析完成"
    );

    Ok(effective)
}

fn resolve_scalar(id: ConstraintId, value: Option<f64>, default: f64) -> ConfigResult<f64> {
    match value {
        Some(v) => positive(id, v),
        None => Ok(default),
    }
}

fn positive(id: ConstraintId, value: f64) -> ConfigResult<f64> {
    if !value.is_finite() {
        warn!(field = %id, value = value, "约束覆写值非有限数值");
        return Err(ConstraintConfigError::NotFinite { field: id, value });
    }
    if value <= 0.0 {
        warn!(field = %id, value = value, "约束覆写值非正数");
        return Err(ConstraintConfigError::NonPositive { field: id, value });
    }
    Ok(value)
}

fn resolve_window(window: Option<LoadingWindow>) -> ConfigResult<LoadingWindow> {
    let Some(w) = window else {
        return Ok(DEFAULT_LOADING_WINDOW);
    };

    let valid = w.start_hour.is_finite()
        && w.end_hour.is_finite()
        && w.start_hour >= 0.0
        && w.end_hour <= 24.0
        && w.start_hour < w.end_hour;

    if !valid {
        warn!(
            start_hour = w.start_hour,
            end_hour = w.end_hour,
            "装车时段覆写无效"
        );
        return Err(ConstraintConfigError::InvalidLoadingWindow {
            start_hour: w.start_hour,
            end_hour: w.end_hour,
        });
    }
    Ok(w)
}

fn ensure_ordered(
    min_field: ConstraintId,
    min: f64,
    max_field: ConstraintId,
    max: f64,
) -> ConfigResult<()> {
    if min > max {
        warn!(min_field = %min_field, min = min, max_field = %max_field, max = max, "约束区间倒置");
        return Err(ConstraintConfigError::InvertedRange {
            min_field,
            min,
            max_field,
            max,
        });
    }
    Ok(())
}
