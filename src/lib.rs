pub mod ads;
pub mod api;
pub mod config;
pub mod error;
pub mod report;
pub mod scoring;
pub mod server;
pub mod telemetry;
pub mod trend;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use ads::{ad_metrics, generate_ad_code, generate_affiliate_link, validate_publisher_id, AdMetrics};
pub use scoring::{engagement, performance_score, seo_score, EngagementMetrics};
pub use trend::{analyze_trend, TrendDirection, TrendReport};

/// Daily traffic counters for one article, as produced by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageViewMetric {
    pub article_id: u64,
    pub date: NaiveDate,
    pub page_views: u64,
    pub unique_visitors: u64,
    #[serde(default)]
    pub avg_time_on_page_seconds: f64,
    #[serde(default)]
    pub bounce_rate_percent: f64,
    #[serde(default)]
    pub scroll_depth_percent: f64,
}

impl PageViewMetric {
    pub fn new(article_id: u64, date: NaiveDate, page_views: u64, unique_visitors: u64) -> Self {
        Self {
            article_id,
            date,
            page_views,
            unique_visitors,
            avg_time_on_page_seconds: 0.0,
            bounce_rate_percent: 0.0,
            scroll_depth_percent: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficSource {
    Organic,
    Direct,
    Referral,
    Social,
    Paid,
    Email,
}

impl TrafficSource {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "organic" | "search" => Some(TrafficSource::Organic),
            "direct" => Some(TrafficSource::Direct),
            "referral" => Some(TrafficSource::Referral),
            "social" => Some(TrafficSource::Social),
            "paid" | "ads" => Some(TrafficSource::Paid),
            "email" => Some(TrafficSource::Email),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrafficSource::Organic => "organic",
            TrafficSource::Direct => "direct",
            TrafficSource::Referral => "referral",
            TrafficSource::Social => "social",
            TrafficSource::Paid => "paid",
            TrafficSource::Email => "email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetrics {
    pub source: TrafficSource,
    pub page_views: u64,
    pub unique_visitors: u64,
    #[serde(default)]
    pub conversions: u64,
}

impl SourceMetrics {
    /// Conversions as a percentage of unique visitors, 2 dp.
    pub fn conversion_rate(&self) -> f64 {
        let rate = scoring::ratio_or_zero(self.conversions as f64, self.unique_visitors as f64);
        round_to(rate * 100.0, 2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceShare {
    pub source: TrafficSource,
    pub page_views: u64,
    pub share_percent: f64,
}

pub fn organic_views(sources: &[SourceMetrics]) -> u64 {
    saturating_total(
        sources
            .iter()
            .filter(|metrics| metrics.source == TrafficSource::Organic)
            .map(|metrics| metrics.page_views),
    )
}

pub fn source_breakdown(sources: &[SourceMetrics]) -> Vec<SourceShare> {
    let total = saturating_total(sources.iter().map(|metrics| metrics.page_views));
    sources
        .iter()
        .map(|metrics| SourceShare {
            source: metrics.source,
            page_views: metrics.page_views,
            share_percent: round_to(
                scoring::ratio_or_zero(metrics.page_views as f64, total as f64) * 100.0,
                2,
            ),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsPeriod {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl AnalyticsPeriod {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "day" | "daily" => Some(AnalyticsPeriod::Day),
            "week" | "weekly" => Some(AnalyticsPeriod::Week),
            "month" | "monthly" => Some(AnalyticsPeriod::Month),
            "quarter" | "quarterly" => Some(AnalyticsPeriod::Quarter),
            "year" | "yearly" => Some(AnalyticsPeriod::Year),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnalyticsPeriod::Day => "day",
            AnalyticsPeriod::Week => "week",
            AnalyticsPeriod::Month => "month",
            AnalyticsPeriod::Quarter => "quarter",
            AnalyticsPeriod::Year => "year",
        }
    }

    pub fn days(self) -> i64 {
        match self {
            AnalyticsPeriod::Day => 1,
            AnalyticsPeriod::Week => 7,
            AnalyticsPeriod::Month => 30,
            AnalyticsPeriod::Quarter => 90,
            AnalyticsPeriod::Year => 365,
        }
    }
}

/// Counter totals pin at `u64::MAX` instead of overflowing.
pub fn saturating_total(values: impl IntoIterator<Item = u64>) -> u64 {
    values
        .into_iter()
        .fold(0u64, |acc, value| acc.saturating_add(value))
}

/// Rounds to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    (value + 0.5).floor()
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    round_half_up(value * factor) / factor
}

pub fn format_number(value: f64) -> String {
    let rounded = round_half_up(value).max(0.0) as u64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

/// Formats a value that is already expressed in percent.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn format_usd(value: f64) -> String {
    format!("${:.2}", value)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
