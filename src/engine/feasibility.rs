// ==========================================
// 铁路装车编组计划 - 可行性评分
// ==========================================
// 公式: score = max(0, 100 - 50 × 硬违规数 - 5 × 软违规数)
// 任意两项硬违规即归零; 软违规逐步扣分
// ==========================================

use crate::config::catalog::{
    FEASIBILITY_BASE_SCORE, HARD_VIOLATION_SCORE_WEIGHT, SOFT_VIOLATION_SCORE_WEIGHT,
};

pub struct FeasibilityScorer;

impl FeasibilityScorer {
    /// 由违规条数计算可行性评分 (0-100)
    pub fn score(hard_count: usize, soft_count: usize) -> u32 {
        let deduction = (hard_count as u64)
            .saturating_mul(HARD_VIOLATION_SCORE_WEIGHT as u64)
            .saturating_add((soft_count as u64).saturating_mul(SOFT_VIOLATION_SCORE_WEIGHT as u64));

        (FEASIBILITY_BASE_SCORE as u64).saturating_sub(deduction) as u32
    }
}
