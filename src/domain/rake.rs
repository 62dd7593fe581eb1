// ==========================================
// 铁路装车编组计划 - 编组 (Rake) 领域模型
// ==========================================
// 红线: 校验期间编组数据只读,引擎不得修改
// ==========================================

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

// ==========================================
// Rake - 编组
// ==========================================
// 由外部编组计划器生成,作为一个运输单元发运
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rake {
    // ===== 主键 =====
    pub rake_id: String, // 编组标识 (计划内唯一)

    // ===== 装载 =====
    pub total_load_t: f64,    // 总载重 (吨)
    pub utilization_pct: f64, // 装载率 (%, 异常数据可能 > 100)

    // ===== 费用与时效 =====
    pub cost: f64,                            // 运费 (货币单位)
    pub estimated_delivery_at: DateTime<Utc>, // 预计送达时间

    // ===== 可选线路信息 =====
    #[serde(default)]
    pub distance_km: Option<f64>, // 运距 (缺失时不做运距校验)
    #[serde(default)]
    pub loading_at: Option<NaiveDateTime>, // 计划装车时间 (站场当地时间)
}

impl Rake {
    /// 创建编组 (可选字段为空)
    pub fn new(
        rake_id: impl Into<String>,
        total_load_t: f64,
        utilization_pct: f64,
        cost: f64,
        estimated_delivery_at: DateTime<Utc>,
    ) -> Self {
        Self {
            rake_id: rake_id.into(),
            total_load_t,
            utilization_pct,
            cost,
            estimated_delivery_at,
            distance_km: None,
            loading_at: None,
        }
    }

    pub fn with_distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    pub fn with_loading_at(mut self, loading_at: NaiveDateTime) -> Self {
        self.loading_at = Some(loading_at);
        self
    }

    /// 距参考时间的送达小时数 (参考时间之前送达为负)
    pub fn hours_until_delivery(&self, reference_time: DateTime<Utc>) -> f64 {
        (self.estimated_delivery_at - reference_time).num_milliseconds() as f64 / MILLIS_PER_HOUR
    }

    /// 吨运费
    ///
    /// # 返回
    /// - `None`: 总载重为 0,无法计算 (数据质量问题,由调用方跳过相关校验)
    pub fn cost_per_tonne(&self) -> Option<f64> {
        if self.total_load_t == 0.0 {
            return None;
        }
        Some(self.cost / self.total_load_t)
    }

    /// 装车时刻 (一天中的小时数, 含小数)
    pub fn loading_hour_of_day(&self) -> Option<f64> {
        self.loading_at.map(|at| {
            at.hour() as f64 + at.minute() as f64 / 60.0 + at.second() as f64 / 3600.0
        })
    }
}
