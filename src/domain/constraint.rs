// ==========================================
// 铁路装车编组计划 - 约束集领域模型
// ==========================================
// ConstraintSet: 调用方提供的部分覆写 (缺失字段取约束目录默认值)
// EffectiveConstraints: 解析后的完整阈值表 (只能由 config::catalog 解析得到)
// ==========================================

use crate::domain::types::ConstraintId;
use serde::{Deserialize, Serialize};

// ==========================================
// LoadingWindow - 期望装车时段
// ==========================================
// 半开区间 [start_hour, end_hour), 单位: 小时 (0-24)
// 例: 默认时段 06:00-22:00 含 06:00, 不含 22:00
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadingWindow {
    pub start_hour: f64,
    pub end_hour: f64,
}

impl LoadingWindow {
    pub const fn new(start_hour: f64, end_hour: f64) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn contains(&self, hour_of_day: f64) -> bool {
        hour_of_day >= self.start_hour && hour_of_day < self.end_hour
    }

    /// 偏离时段的小时数, 按已开始的整小时计 (时段内为 0)
    ///
    /// - 结束后: 22:00 计 1 小时, 23:30 计 2 小时
    /// - 开始前: 05:30 计 1 小时, 04:00 计 2 小时
    /// - 跨零点取较少的一侧
    pub fn hours_outside(&self, hour_of_day: f64) -> f64 {
        if self.contains(hour_of_day) {
            return 0.0;
        }
        let (after_end, before_start) = if hour_of_day >= self.end_hour {
            (hour_of_day - self.end_hour, self.start_hour + 24.0 - hour_of_day)
        } else {
            (hour_of_day + 24.0 - self.end_hour, self.start_hour - hour_of_day)
        };
        (after_end.floor() + 1.0).min(before_start.ceil())
    }
}

// ==========================================
// ConstraintSet - 约束覆写集
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintSet {
    // ===== 硬约束 =====
    pub min_rake_size: Option<f64>,      // 最小编组吨位 (吨)
    pub max_rake_size: Option<f64>,      // 最大编组吨位 (吨)
    pub min_order_qty: Option<f64>,      // 最小订单量
    pub max_order_qty: Option<f64>,      // 最大订单量
    pub max_delivery_hours: Option<f64>, // 最长送达时限 (小时)
    pub max_distance: Option<f64>,       // 最大运距 (公里)
    pub max_cost: Option<f64>,           // 单编组费用上限 (无默认值)

    // ===== 软约束 =====
    pub min_utilization: Option<f64>,                 // 最低装载率 (%)
    pub max_cost_per_tonne: Option<f64>,              // 期望吨运费上限
    pub preferred_loading_hours: Option<LoadingWindow>, // 期望装车时段
    pub max_rakes_per_day: Option<f64>,               // 每日发运上限 (列)
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取标量阈值覆写
    ///
    /// 非标量约束 (装车时段/期望送达时限) 返回 None
    pub fn override_value(&self, id: ConstraintId) -> Option<f64> {
        match id {
            ConstraintId::MinRakeSize => self.min_rake_size,
            ConstraintId::MaxRakeSize => self.max_rake_size,
            ConstraintId::MinOrderQty => self.min_order_qty,
            ConstraintId::MaxOrderQty => self.max_order_qty,
            ConstraintId::MaxDeliveryHours => self.max_delivery_hours,
            ConstraintId::MaxDistance => self.max_distance,
            ConstraintId::MaxCost => self.max_cost,
            ConstraintId::MinUtilization => self.min_utilization,
            ConstraintId::MaxCostPerTonne => self.max_cost_per_tonne,
            ConstraintId::MaxRakesPerDay => self.max_rakes_per_day,
            ConstraintId::PreferredDeliveryHours | ConstraintId::PreferredLoadingHours => None,
        }
    }

    /// 写入标量阈值覆写
    ///
    /// # 返回
    /// - `false`: 该约束不是可覆写的标量阈值
    pub fn set_override(&mut self, id: ConstraintId, value: f64) -> bool {
        let slot = match id {
            ConstraintId::MinRakeSize => &mut self.min_rake_size,
            ConstraintId::MaxRakeSize => &mut self.max_rake_size,
            ConstraintId::MinOrderQty => &mut self.min_order_qty,
            ConstraintId::MaxOrderQty => &mut self.max_order_qty,
            ConstraintId::MaxDeliveryHours => &mut self.max_delivery_hours,
            ConstraintId::MaxDistance => &mut self.max_distance,
            ConstraintId::MaxCost => &mut self.max_cost,
            ConstraintId::MinUtilization => &mut self.min_utilization,
            ConstraintId::MaxCostPerTonne => &mut self.max_cost_per_tonne,
            ConstraintId::MaxRakesPerDay => &mut self.max_rakes_per_day,
            ConstraintId::PreferredDeliveryHours | ConstraintId::PreferredLoadingHours => {
                return false
            }
        };
        *slot = Some(value);
        true
    }

    /// 以 self 覆盖 base: 字段级 `self ?? base`
    ///
    /// 用于 "站点配置 + 单次请求覆写" 的分层
    pub fn overlay(&self, base: &ConstraintSet) -> ConstraintSet {
        ConstraintSet {
            min_rake_size: self.min_rake_size.or(base.min_rake_size),
            max_rake_size: self.max_rake_size.or(base.max_rake_size),
            min_order_qty: self.min_order_qty.or(base.min_order_qty),
            max_order_qty: self.max_order_qty.or(base.max_order_qty),
            max_delivery_hours: self.max_delivery_hours.or(base.max_delivery_hours),
            max_distance: self.max_distance.or(base.max_distance),
            max_cost: self.max_cost.or(base.max_cost),
            min_utilization: self.min_utilization.or(base.min_utilization),
            max_cost_per_tonne: self.max_cost_per_tonne.or(base.max_cost_per_tonne),
            preferred_loading_hours: self.preferred_loading_hours.or(base.preferred_loading_hours),
            max_rakes_per_day: self.max_rakes_per_day.or(base.max_rakes_per_day),
        }
    }

    /// 是否没有任何覆写
    pub fn is_empty(&self) -> bool {
        *self == ConstraintSet::default()
    }
}

// ==========================================
// EffectiveConstraints - 生效阈值表
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveConstraints {
    // ===== 硬约束 =====
    pub min_rake_size: f64,
    pub max_rake_size: f64,
    pub min_order_qty: f64,
    pub max_order_qty: f64,
    pub max_delivery_hours: f64,
    pub max_distance: f64,
    pub max_cost: Option<f64>, // None: 不校验费用上限

    // ===== 软约束 =====
    pub min_utilization: f64,
    pub max_cost_per_tonne: f64,
    pub preferred_loading_hours: LoadingWindow,
    pub max_rakes_per_day: f64,
}
