use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ads::{AdRevenueMetric, AffiliateLink, RevenueStats};
use crate::error::AppError;
use crate::report::{DashboardMetrics, TrafficTrend};
use crate::scoring::{PerformanceBreakdown, SeoBreakdown};
use crate::trend::TrendDirection;
use crate::{organic_views, AnalyticsPeriod, PageViewMetric, SourceMetrics};

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub views: u64,
    pub avg_time_on_page_seconds: f64,
    #[serde(default)]
    pub likes: u64,
    pub bounce_rate_percent: f64,
    pub organic_views: Option<u64>,
    pub total_views: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub performance_score: u8,
    pub performance: PerformanceBreakdown,
    pub seo_score: Option<u8>,
    pub seo: Option<SeoBreakdown>,
}

#[derive(Debug, Deserialize)]
pub struct EngagementRequest {
    pub page_views: u64,
    pub unique_visitors: u64,
    pub avg_time_on_page_seconds: f64,
    pub bounce_rate_percent: f64,
}

#[derive(Debug, Deserialize)]
pub struct TrendRequest {
    pub series: Vec<PageViewMetric>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendResponse {
    pub direction: TrendDirection,
    pub percent_change: f64,
    pub points: usize,
    pub window_days: u32,
}

#[derive(Debug, Deserialize)]
pub struct ArticleReportRequest {
    pub article_id: u64,
    #[serde(default)]
    pub title: String,
    pub series: Vec<PageViewMetric>,
    #[serde(default)]
    pub likes: u64,
    pub organic_views: Option<u64>,
    #[serde(default)]
    pub sources: Vec<SourceMetrics>,
}

impl ArticleReportRequest {
    /// Explicit organic views win over the per-source breakdown.
    pub fn organic_views(&self) -> u64 {
        self.organic_views
            .unwrap_or_else(|| organic_views(&self.sources))
    }
}

#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    pub metrics: Vec<PageViewMetric>,
    #[serde(default)]
    pub titles: HashMap<u64, String>,
    #[serde(default)]
    pub revenue: Vec<AdRevenueMetric>,
    pub period: Option<String>,
    pub as_of: Option<NaiveDate>,
}

impl DashboardRequest {
    pub fn period(&self) -> Result<AnalyticsPeriod, AppError> {
        match self.period.as_deref() {
            None => Ok(AnalyticsPeriod::Month),
            Some(label) => AnalyticsPeriod::from_label(label)
                .ok_or_else(|| AppError::invalid(format!("unknown period: {}", label))),
        }
    }

    /// Revenue window end: the requested date, else the latest revenue day.
    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
            .or_else(|| self.revenue.iter().map(|record| record.date).max())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub metrics: DashboardMetrics,
    pub daily: Vec<TrafficTrend>,
    pub revenue: Option<RevenueStats>,
}

#[derive(Debug, Deserialize)]
pub struct AdMetricsRequest {
    pub impressions: u64,
    pub clicks: u64,
    pub revenue_usd: f64,
}

#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    pub publisher_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub publisher_id: String,
    pub valid: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdCodeRequest {
    pub publisher_id: Option<String>,
    pub ad_slot: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdCodeResponse {
    pub publisher_id: String,
    pub ad_slot: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct AffiliateRequest {
    pub link: AffiliateLink,
    pub affiliate_id: String,
    pub product_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AffiliateResponse {
    pub link_id: String,
    pub url: Option<String>,
}
