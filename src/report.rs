//! Dashboard-facing roll-ups built on top of the scorers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::AnalyticsConfig;
use crate::scoring::{engagement, ratio_or_zero, EngagementMetrics, PerformanceScorer, SeoScorer};
use crate::trend::{TrendAnalyzer, TrendReport};
use crate::{round_to, saturating_total, PageViewMetric};

/// Scorers built once from configuration and shared by every report.
#[derive(Debug, Clone, Default)]
pub struct Scorers {
    pub performance: PerformanceScorer,
    pub seo: SeoScorer,
    pub trend: TrendAnalyzer,
}

impl Scorers {
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self {
            performance: PerformanceScorer::new(config.performance.clone()),
            seo: SeoScorer::new(config.seo.clone()),
            trend: TrendAnalyzer::new(config.trend.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticlePerformance {
    pub article_id: u64,
    pub title: String,
    pub total_views: u64,
    pub total_unique_visitors: u64,
    pub avg_time_on_page_seconds: f64,
    pub bounce_rate_percent: f64,
    pub likes: u64,
    pub performance_score: u8,
    pub seo_score: u8,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleReport {
    pub performance: ArticlePerformance,
    pub engagement: EngagementMetrics,
    pub trend: TrendReport,
}

impl ArticleReport {
    /// Aggregates one article's daily series. Records belonging to other
    /// articles are ignored; the remaining order is kept for the trend.
    pub fn build(
        scorers: &Scorers,
        article_id: u64,
        title: &str,
        series: &[PageViewMetric],
        likes: u64,
        organic_views: u64,
    ) -> Self {
        let own: Vec<PageViewMetric> = series
            .iter()
            .filter(|metric| metric.article_id == article_id)
            .cloned()
            .collect();

        let total_views = saturating_total(own.iter().map(|metric| metric.page_views));
        let total_unique_visitors = saturating_total(own.iter().map(|metric| metric.unique_visitors));
        let avg_time_on_page_seconds =
            view_weighted_mean(&own, |metric| metric.avg_time_on_page_seconds);
        let bounce_rate_percent = view_weighted_mean(&own, |metric| metric.bounce_rate_percent);

        let performance_score = scorers.performance.score(
            total_views,
            avg_time_on_page_seconds,
            likes,
            bounce_rate_percent,
        );
        let seo_score = scorers.seo.score(
            organic_views,
            total_views,
            avg_time_on_page_seconds,
            bounce_rate_percent,
        );

        let performance = ArticlePerformance {
            article_id,
            title: title.to_string(),
            total_views,
            total_unique_visitors,
            avg_time_on_page_seconds: round_to(avg_time_on_page_seconds, 2),
            bounce_rate_percent: round_to(bounce_rate_percent, 2),
            likes,
            performance_score,
            seo_score,
            first_date: own.iter().map(|metric| metric.date).min(),
            last_date: own.iter().map(|metric| metric.date).max(),
        };

        ArticleReport {
            performance,
            engagement: engagement(
                total_views,
                total_unique_visitors,
                avg_time_on_page_seconds,
                bounce_rate_percent,
            ),
            trend: scorers.trend.analyze(&own),
        }
    }
}

fn view_weighted_mean(metrics: &[PageViewMetric], value: impl Fn(&PageViewMetric) -> f64) -> f64 {
    let mut weighted = 0.0;
    let mut views = 0.0;
    for metric in metrics {
        let sample = value(metric);
        if sample.is_nan() {
            continue;
        }
        weighted += sample * metric.page_views as f64;
        views += metric.page_views as f64;
    }
    ratio_or_zero(weighted, views)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopArticle {
    pub id: u64,
    pub title: String,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficTrend {
    pub date: NaiveDate,
    pub total_page_views: u64,
    pub total_unique_visitors: u64,
    /// Mean page views per article that day, 2 dp.
    pub avg_page_views: f64,
    pub top_article: TopArticle,
}

/// One entry per date, ascending. Views for the same article on the same
/// date are summed before picking the top article; ties go to the lowest id.
pub fn daily_traffic(metrics: &[PageViewMetric], titles: &HashMap<u64, String>) -> Vec<TrafficTrend> {
    let mut by_date: BTreeMap<NaiveDate, BTreeMap<u64, (u64, u64)>> = BTreeMap::new();
    for metric in metrics {
        let entry = by_date
            .entry(metric.date)
            .or_default()
            .entry(metric.article_id)
            .or_insert((0, 0));
        entry.0 = entry.0.saturating_add(metric.page_views);
        entry.1 = entry.1.saturating_add(metric.unique_visitors);
    }

    by_date
        .into_iter()
        .map(|(date, articles)| {
            let total_page_views = saturating_total(articles.values().map(|(views, _)| *views));
            let total_unique_visitors =
                saturating_total(articles.values().map(|(_, visitors)| *visitors));

            let mut top: Option<(u64, u64)> = None;
            for (id, (views, _)) in &articles {
                match top {
                    Some((_, best)) if *views <= best => {}
                    _ => top = Some((*id, *views)),
                }
            }
            let (top_id, top_views) = top.unwrap_or((0, 0));

            TrafficTrend {
                date,
                total_page_views,
                total_unique_visitors,
                avg_page_views: round_to(
                    ratio_or_zero(total_page_views as f64, articles.len() as f64),
                    2,
                ),
                top_article: TopArticle {
                    id: top_id,
                    title: titles.get(&top_id).cloned().unwrap_or_default(),
                    views: top_views,
                },
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_articles: usize,
    pub total_page_views: u64,
    pub total_unique_visitors: u64,
}

impl DashboardMetrics {
    pub fn from_metrics(metrics: &[PageViewMetric]) -> Self {
        let articles: HashSet<u64> = metrics.iter().map(|metric| metric.article_id).collect();
        Self {
            total_articles: articles.len(),
            total_page_views: saturating_total(metrics.iter().map(|metric| metric.page_views)),
            total_unique_visitors: saturating_total(
                metrics.iter().map(|metric| metric.unique_visitors),
            ),
        }
    }
}
