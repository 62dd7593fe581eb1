// ==========================================
// 铁路装车编组计划 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 违规类别 (Violation Kind)
// ==========================================
// 红线: 硬约束违规 => 计划无效; 软约束违规只计罚金
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    Hard,
    Soft,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Hard => write!(f, "HARD"),
            ViolationKind::Soft => write!(f, "SOFT"),
        }
    }
}

// ==========================================
// 严重程度 (Severity)
// ==========================================
// 顺序: Low < Medium < High < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ==========================================
// 阈值方向 (Threshold Bound)
// ==========================================
// Lower: 下限阈值 (放宽 = 减小)
// Upper: 上限阈值 (放宽 = 增大)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThresholdBound {
    Lower,
    Upper,
}

// ==========================================
// 约束标识 (Constraint Id)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与宿主/前端一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintId {
    // ===== 硬约束 =====
    MinRakeSize,
    MaxRakeSize,
    MinOrderQty,
    MaxOrderQty,
    MaxDeliveryHours,
    MaxDistance,
    MaxCost,

    // ===== 软约束 =====
    MinUtilization,
    MaxCostPerTonne,
    PreferredDeliveryHours,
    PreferredLoadingHours,
    MaxRakesPerDay,
}

impl ConstraintId {
    pub const ALL: [ConstraintId; 12] = [
        ConstraintId::MinRakeSize,
        ConstraintId::MaxRakeSize,
        ConstraintId::MinOrderQty,
        ConstraintId::MaxOrderQty,
        ConstraintId::MaxDeliveryHours,
        ConstraintId::MaxDistance,
        ConstraintId::MaxCost,
        ConstraintId::MinUtilization,
        ConstraintId::MaxCostPerTonne,
        ConstraintId::PreferredDeliveryHours,
        ConstraintId::PreferredLoadingHours,
        ConstraintId::MaxRakesPerDay,
    ];

    /// 对外标识 (如 "MIN_RAKE_SIZE")
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintId::MinRakeSize => "MIN_RAKE_SIZE",
            ConstraintId::MaxRakeSize => "MAX_RAKE_SIZE",
            ConstraintId::MinOrderQty => "MIN_ORDER_QTY",
            ConstraintId::MaxOrderQty => "MAX_ORDER_QTY",
            ConstraintId::MaxDeliveryHours => "MAX_DELIVERY_HOURS",
            ConstraintId::MaxDistance => "MAX_DISTANCE",
            ConstraintId::MaxCost => "MAX_COST",
            ConstraintId::MinUtilization => "MIN_UTILIZATION",
            ConstraintId::MaxCostPerTonne => "MAX_COST_PER_TONNE",
            ConstraintId::PreferredDeliveryHours => "PREFERRED_DELIVERY_HOURS",
            ConstraintId::PreferredLoadingHours => "PREFERRED_LOADING_HOURS",
            ConstraintId::MaxRakesPerDay => "MAX_RAKES_PER_DAY",
        }
    }

    /// 翻译键片段 (如 "min_rake_size")
    pub fn i18n_key(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }

    /// 约束所属类别
    pub fn kind(&self) -> ViolationKind {
        match self {
            ConstraintId::MinRakeSize
            | ConstraintId::MaxRakeSize
            | ConstraintId::MinOrderQty
            | ConstraintId::MaxOrderQty
            | ConstraintId::MaxDeliveryHours
            | ConstraintId::MaxDistance
            | ConstraintId::MaxCost => ViolationKind::Hard,
            ConstraintId::MinUtilization
            | ConstraintId::MaxCostPerTonne
            | ConstraintId::PreferredDeliveryHours
            | ConstraintId::PreferredLoadingHours
            | ConstraintId::MaxRakesPerDay => ViolationKind::Soft,
        }
    }

    /// 阈值方向
    pub fn bound(&self) -> ThresholdBound {
        match self {
            ConstraintId::MinRakeSize | ConstraintId::MinOrderQty | ConstraintId::MinUtilization => {
                ThresholdBound::Lower
            }
            _ => ThresholdBound::Upper,
        }
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConstraintId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        ConstraintId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| format!("未知约束标识: {}", s))
    }
}
