use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::scoring::ratio_or_zero;
use crate::{round_to, AnalyticsPeriod};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdMetrics {
    pub ctr_percent: f64,
    pub cpm_usd: f64,
}

/// Click-through rate in percent and revenue per thousand impressions.
/// Both are 0 when there were no impressions.
pub fn ad_metrics(impressions: u64, clicks: u64, revenue_usd: f64) -> AdMetrics {
    let impressions = impressions as f64;
    AdMetrics {
        ctr_percent: ratio_or_zero(clicks as f64, impressions) * 100.0,
        cpm_usd: ratio_or_zero(revenue_usd.max(0.0), impressions) * 1000.0,
    }
}

/// One day of ad delivery. `ctr_percent` and `cpm_usd` are derived, never
/// read from the source record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdRevenueMetric {
    pub date: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub revenue_usd: f64,
    #[serde(default)]
    pub ctr_percent: f64,
    #[serde(default)]
    pub cpm_usd: f64,
}

impl AdRevenueMetric {
    pub fn from_counters(date: NaiveDate, impressions: u64, clicks: u64, revenue_usd: f64) -> Self {
        let metrics = ad_metrics(impressions, clicks, revenue_usd);
        Self {
            date,
            impressions,
            clicks,
            revenue_usd,
            ctr_percent: metrics.ctr_percent,
            cpm_usd: metrics.cpm_usd,
        }
    }

    pub fn recompute(&self) -> Self {
        Self::from_counters(self.date, self.impressions, self.clicks, self.revenue_usd)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueStats {
    pub period: AnalyticsPeriod,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days_reported: usize,
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub total_revenue_usd: f64,
    pub ctr_percent: f64,
    pub cpm_usd: f64,
}

/// Totals over the trailing `period` ending at `as_of`, inclusive. A window
/// reaching past the earliest representable date starts at `NaiveDate::MIN`.
pub fn revenue_stats(
    records: &[AdRevenueMetric],
    period: AnalyticsPeriod,
    as_of: NaiveDate,
) -> RevenueStats {
    let from = as_of
        .checked_sub_signed(Duration::days(period.days() - 1))
        .unwrap_or(NaiveDate::MIN);
    let mut total_impressions = 0u64;
    let mut total_clicks = 0u64;
    let mut total_revenue = 0.0;
    let mut days_reported = 0usize;

    for record in records
        .iter()
        .filter(|record| record.date >= from && record.date <= as_of)
    {
        total_impressions = total_impressions.saturating_add(record.impressions);
        total_clicks = total_clicks.saturating_add(record.clicks);
        total_revenue += record.revenue_usd.max(0.0);
        days_reported += 1;
    }

    let metrics = ad_metrics(total_impressions, total_clicks, total_revenue);
    RevenueStats {
        period,
        from,
        to: as_of,
        days_reported,
        total_impressions,
        total_clicks,
        total_revenue_usd: round_to(total_revenue, 2),
        ctr_percent: metrics.ctr_percent,
        cpm_usd: metrics.cpm_usd,
    }
}
