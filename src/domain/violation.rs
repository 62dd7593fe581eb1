// ==========================================
// 铁路装车编组计划 - 违规与校验结果
// ==========================================
// 红线: 违规对象每次校验新建, 生成后不再修改
// 红线: 硬违规罚金恒为 0
// ==========================================

use crate::domain::types::{ConstraintId, Severity, ViolationKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Violation - 约束违规
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub constraint_id: ConstraintId,
    pub severity: Severity,
    pub message: String,             // 含实际值与阈值
    pub affected_rakes: Vec<String>, // 去重, 保持输入顺序
    pub penalty: f64,                // 罚金 (>= 0)
    pub fix_suggestion: String,
}

impl Violation {
    /// 硬约束违规 (单编组, 罚金 0)
    pub fn hard(
        constraint_id: ConstraintId,
        severity: Severity,
        rake_id: &str,
        message: String,
        fix_suggestion: String,
    ) -> Self {
        Self {
            kind: ViolationKind::Hard,
            constraint_id,
            severity,
            message,
            affected_rakes: vec![rake_id.to_string()],
            penalty: 0.0,
            fix_suggestion,
        }
    }

    /// 软约束违规
    pub fn soft(
        constraint_id: ConstraintId,
        severity: Severity,
        affected_rakes: Vec<String>,
        penalty: f64,
        message: String,
        fix_suggestion: String,
    ) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(affected_rakes.len());
        for rake_id in affected_rakes {
            if !unique.contains(&rake_id) {
                unique.push(rake_id);
            }
        }

        Self {
            kind: ViolationKind::Soft,
            constraint_id,
            severity,
            message,
            affected_rakes: unique,
            penalty: penalty.max(0.0),
            fix_suggestion,
        }
    }

    pub fn is_hard(&self) -> bool {
        self.kind == ViolationKind::Hard
    }
}

// ==========================================
// DataQualityNote - 数据质量提示
// ==========================================
// 用途: 记录因输入数据问题而跳过的校验 (不计入违规/评分)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityNote {
    pub rake_id: String,
    pub check: ConstraintId, // 被跳过的校验
    pub message: String,
}

// ==========================================
// ValidationResult - 计划校验结果
// ==========================================
// 不变式:
// - is_valid == hard_violations.is_empty()
// - total_penalty == Σ soft_violations[].penalty
// - feasibility_score ∈ [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub hard_violations: Vec<Violation>,
    pub soft_violations: Vec<Violation>,
    pub total_penalty: f64,
    pub feasibility_score: u32,

    // ===== 附加信息 =====
    pub data_quality_notes: Vec<DataQualityNote>,
    pub rake_count: usize,
    pub reference_time: DateTime<Utc>,
}

impl ValidationResult {
    pub fn violation_count(&self) -> usize {
        self.hard_violations.len() + self.soft_violations.len()
    }

    pub fn has_violations(&self) -> bool {
        self.violation_count() > 0
    }

    /// 硬违规在前, 软违规在后
    pub fn all_violations(&self) -> impl Iterator<Item = &Violation> {
        self.hard_violations.iter().chain(self.soft_violations.iter())
    }

    /// 某编组涉及的全部违规
    pub fn violations_for_rake<'a>(
        &'a self,
        rake_id: &'a str,
    ) -> impl Iterator<Item = &'a Violation> + 'a {
        self.all_violations()
            .filter(move |v| v.affected_rakes.iter().any(|id| id == rake_id))
    }
}

// ==========================================
// RelaxationSuggestion - 约束放宽建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelaxationSuggestion {
    pub constraint_id: ConstraintId,
    pub amount: f64, // 放宽幅度 (正数; 方向由约束的阈值方向决定)
    pub impact: String,
    pub addressed_violations: usize, // 该约束涉及的违规条数
}

impl RelaxationSuggestion {
    pub fn new(constraint_id: ConstraintId, amount: f64) -> Self {
        Self {
            constraint_id,
            amount,
            impact: String::new(),
            addressed_violations: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_violation_dedups_rakes_and_clamps_penalty() {
        let v = Violation::soft(
            ConstraintId::MaxRakesPerDay,
            Severity::Medium,
            vec!["R1".into(), "R2".into(), "R1".into()],
            -5.0,
            "msg".into(),
            "fix".into(),
        );
        assert_eq!(v.affected_rakes, vec!["R1".to_string(), "R2".to_string()]);
        assert_eq!(v.penalty, 0.0);
        assert!(!v.is_hard());
    }

    #[test]
    fn test_hard_violation_has_zero_penalty() {
        let v = Violation::hard(
            ConstraintId::MinRakeSize,
            Severity::Critical,
            "R1",
            "msg".into(),
            "fix".into(),
        );
        assert!(v.is_hard());
        assert_eq!(v.penalty, 0.0);
        assert_eq!(v.affected_rakes, vec!["R1".to_string()]);
    }
}
