// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供集成测试所需的编组构建器与固定参考时间
// ==========================================
#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rail_rake_aps::Rake;

/// 固定参考时间: 2026-03-01 08:00 UTC
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
}

// ==========================================
// Rake 构建器
// ==========================================

pub struct RakeBuilder {
    rake_id: String,
    total_load_t: f64,
    utilization_pct: f64,
    cost: f64,
    delivery_hours: i64,
    distance_km: Option<f64>,
    loading_at: Option<NaiveDateTime>,
}

impl RakeBuilder {
    /// 默认值为合规编组: 70 t, 85 %, 60000, 20 小时后送达
    pub fn new(rake_id: &str) -> Self {
        Self {
            rake_id: rake_id.to_string(),
            total_load_t: 70.0,
            utilization_pct: 85.0,
            cost: 60_000.0,
            delivery_hours: 20,
            distance_km: None,
            loading_at: None,
        }
    }

    pub fn load(mut self, total_load_t: f64) -> Self {
        self.total_load_t = total_load_t;
        self
    }

    pub fn utilization(mut self, utilization_pct: f64) -> Self {
        self.utilization_pct = utilization_pct;
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn delivery_in_hours(mut self, hours: i64) -> Self {
        self.delivery_hours = hours;
        self
    }

    pub fn distance(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    /// 装车时刻 (参考日期当天)
    pub fn loading_at(mut self, hour: u32, minute: u32) -> Self {
        self.loading_at = NaiveDate::from_ymd_opt(2026, 3, 1)
            .and_then(|d| d.and_hms_opt(hour, minute, 0));
        self
    }

    pub fn build(self) -> Rake {
        let mut rake = Rake::new(
            &self.rake_id,
            self.total_load_t,
            self.utilization_pct,
            self.cost,
            reference_time() + Duration::hours(self.delivery_hours),
        );
        rake.distance_km = self.distance_km;
        rake.loading_at = self.loading_at;
        rake
    }
}

/// 创建合规编组
pub fn create_compliant_rake(rake_id: &str) -> Rake {
    RakeBuilder::new(rake_id).build()
}

/// 创建不可行编组: 50 t, 60 %, 60000, 80 小时后送达
pub fn create_infeasible_rake(rake_id: &str) -> Rake {
    RakeBuilder::new(rake_id)
        .load(50.0)
        .utilization(60.0)
        .delivery_in_hours(80)
        .build()
}
