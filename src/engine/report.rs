// ==========================================
// 铁路装车编组计划 - 违规报告
// ==========================================
// 输出格式:
// - 无违规: 合规提示 (含评分)
// - 有违规: 硬违规列表 / 软违规列表 / 总罚金 (> 0 时) / 评分
// - 数据质量提示单独成段
// ==========================================

use crate::domain::violation::{ValidationResult, Violation};
use crate::i18n::{self, format_amount};

pub struct ViolationReporter {
    locale: String,
}

impl ViolationReporter {
    pub fn new() -> Self {
        Self::with_locale(i18n::DEFAULT_LOCALE)
    }

    pub fn with_locale(locale: &str) -> Self {
        Self {
            locale: i18n::normalize_locale(locale).to_string(),
        }
    }

    /// 生成文本报告
    pub fn summarize(&self, result: &ValidationResult) -> String {
        let score = result.feasibility_score.to_string();
        let mut lines: Vec<String> = Vec::new();

        if !result.has_violations() {
            lines.push(self.t("report.compliant", &[("score", score.as_str())]));
            self.push_notes(result, &mut lines);
            return lines.join("\n");
        }

        if !result.hard_violations.is_empty() {
            let count = result.hard_violations.len().to_string();
            lines.push(self.t("report.hard_header", &[("count", count.as_str())]));
            lines.extend(result.hard_violations.iter().map(|v| self.hard_line(v)));
        }

        if !result.soft_violations.is_empty() {
            let count = result.soft_violations.len().to_string();
            lines.push(self.t("report.soft_header", &[("count", count.as_str())]));
            lines.extend(result.soft_violations.iter().map(|v| self.soft_line(v)));
        }

        if result.total_penalty > 0.0 {
            let amount = format_amount(result.total_penalty);
            lines.push(self.t("report.total_penalty", &[("amount", amount.as_str())]));
        }

        self.push_notes(result, &mut lines);
        lines.push(self.t("report.score", &[("score", score.as_str())]));

        lines.join("\n")
    }

    fn hard_line(&self, v: &Violation) -> String {
        format!(
            "  • [{}] {}: {} → {}",
            v.severity, v.constraint_id, v.message, v.fix_suggestion
        )
    }

    fn soft_line(&self, v: &Violation) -> String {
        let amount = format_amount(v.penalty);
        format!(
            "  • [{}] {}: {} ({}) → {}",
            v.severity,
            v.constraint_id,
            v.message,
            self.t("report.penalty_suffix", &[("amount", amount.as_str())]),
            v.fix_suggestion
        )
    }

    fn push_notes(&self, result: &ValidationResult, lines: &mut Vec<String>) {
        if result.data_quality_notes.is_empty() {
            return;
        }
        let count = result.data_quality_notes.len().to_string();
        lines.push(self.t("report.notes_header", &[("count", count.as_str())]));
        lines.extend(
            result
                .data_quality_notes
                .iter()
                .map(|n| format!("  • {}", n.message)),
        );
    }

    fn t(&self, key: &str, args: &[(&str, &str)]) -> String {
        i18n::t_in(&self.locale, key, args)
    }
}

impl Default for ViolationReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ConstraintId, Severity};
    use crate::domain::violation::DataQualityNote;
    use chrono::{TimeZone, Utc};

    fn empty_result() -> ValidationResult {
        ValidationResult {
            is_valid: true,
            hard_violations: Vec::new(),
            soft_violations: Vec::new(),
            total_penalty: 0.0,
            feasibility_score: 100,
            data_quality_notes: Vec::new(),
            rake_count: 1,
            reference_time: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_compliant_notice() {
        let text = ViolationReporter::new().summarize(&empty_result());
        assert_eq!(
            text,
            "All rakes comply with hard and soft constraints (feasibility score 100/100)."
        );
    }

    #[test]
    fn test_violation_sections() {
        let mut result = empty_result();
        result.is_valid = false;
        result.hard_violations.push(Violation::hard(
            ConstraintId::MinRakeSize,
            Severity::Critical,
            "R1",
            "load too low".into(),
            "consolidate".into(),
        ));
        result.soft_violations.push(Violation::soft(
            ConstraintId::MinUtilization,
            Severity::Medium,
            vec!["R1".into()],
            1000.0,
            "utilization low".into(),
            "top up".into(),
        ));
        result.total_penalty = 1000.0;
        result.feasibility_score = 45;

        let text = ViolationReporter::new().summarize(&result);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Hard constraint violations (1):");
        assert_eq!(
            lines[1],
            "  • [CRITICAL] MIN_RAKE_SIZE: load too low → consolidate"
        );
        assert_eq!(lines[2], "Soft constraint violations (1):");
        assert_eq!(
            lines[3],
            "  • [MEDIUM] MIN_UTILIZATION: utilization low (penalty 1000) → top up"
        );
        assert_eq!(lines[4], "Total penalty: 1000");
        assert_eq!(lines[5], "Feasibility score: 45/100");
    }

    #[test]
    fn test_no_penalty_line_when_only_hard() {
        let mut result = empty_result();
        result.is_valid = false;
        result.hard_violations.push(Violation::hard(
            ConstraintId::MaxRakeSize,
            Severity::Critical,
            "R1",
            "too heavy".into(),
            "split".into(),
        ));
        result.data_quality_notes.push(DataQualityNote {
            rake_id: "R1".into(),
            check: ConstraintId::MaxCostPerTonne,
            message: "zero load".into(),
        });

        let text = ViolationReporter::new().summarize(&result);
        assert!(!text.contains("Total penalty"));
        assert!(!text.contains("Soft constraint violations"));
        assert!(text.contains("Data quality notes (1):"));
        assert!(text.contains("  • zero load"));
    }

    #[test]
    fn test_localized_summary() {
        let text = ViolationReporter::with_locale("zh-CN").summarize(&empty_result());
        assert!(text.contains("所有编组均满足"));
    }
}
