// ==========================================
// 铁路装车编组计划 - API 请求/响应结构
// ==========================================

use crate::domain::constraint::ConstraintSet;
use crate::domain::rake::Rake;
use crate::domain::violation::{RelaxationSuggestion, ValidationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 计划校验请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub rakes: Vec<Rake>,

    /// 约束覆写 (叠加在站点默认约束之上)
    #[serde(default)]
    pub constraints: ConstraintSet,

    /// 参考时间 (必填, 贯穿本次请求的全部校验)
    pub reference_time: DateTime<Utc>,

    /// 输出语言 (en / zh-CN), 缺省 en
    #[serde(default)]
    pub locale: Option<String>,
}

impl ValidationRequest {
    pub fn new(rakes: Vec<Rake>, reference_time: DateTime<Utc>) -> Self {
        Self {
            rakes,
            constraints: ConstraintSet::default(),
            reference_time,
            locale: None,
        }
    }

    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// 计划校验响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub result: ValidationResult,

    /// 放宽建议 (仅当计划存在硬违规时给出)
    pub suggestions: Vec<RelaxationSuggestion>,

    /// 文本报告
    pub summary: String,

    pub locale: String,
}
