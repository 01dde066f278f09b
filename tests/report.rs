use chrono::NaiveDate;
use std::collections::HashMap;

use pubmetrics::report::{daily_traffic, ArticleReport, DashboardMetrics, Scorers};
use pubmetrics::trend::TrendDirection;
use pubmetrics::{
    organic_views, source_breakdown, AnalyticsPeriod, PageViewMetric, SourceMetrics, TrafficSource,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

fn metric(article_id: u64, d: u32, views: u64, visitors: u64, time: f64, bounce: f64) -> PageViewMetric {
    PageViewMetric {
        avg_time_on_page_seconds: time,
        bounce_rate_percent: bounce,
        ..PageViewMetric::new(article_id, day(d), views, visitors)
    }
}

#[test]
fn article_report_aggregates_own_series() {
    let series = vec![
        metric(7, 1, 100, 80, 60.0, 40.0),
        metric(9, 1, 5000, 4000, 10.0, 90.0),
        metric(7, 2, 300, 200, 120.0, 20.0),
    ];

    let report = ArticleReport::build(&Scorers::default(), 7, "Rust in production", &series, 50, 100);
    let performance = &report.performance;

    assert_eq!(performance.total_views, 400);
    assert_eq!(performance.total_unique_visitors, 280);
    assert!((performance.avg_time_on_page_seconds - 105.0).abs() < 1e-9);
    assert!((performance.bounce_rate_percent - 25.0).abs() < 1e-9);
    assert_eq!(performance.performance_score, 44);
    assert_eq!(performance.seo_score, 45);
    assert_eq!(performance.first_date, Some(day(1)));
    assert_eq!(performance.last_date, Some(day(2)));

    assert!((report.engagement.engagement_rate - 75.0).abs() < 1e-9);
    assert!((report.engagement.return_visitor_rate - 42.86).abs() < 1e-9);
    assert_eq!(report.engagement.avg_session_duration, 105);

    assert_eq!(report.trend.direction, TrendDirection::Up);
    assert!((report.trend.percent_change - 200.0).abs() < 1e-9);
}

#[test]
fn article_report_without_traffic_is_degenerate_not_broken() {
    let report = ArticleReport::build(&Scorers::default(), 3, "", &[], 0, 0);
    assert_eq!(report.performance.total_views, 0);
    assert_eq!(report.performance.avg_time_on_page_seconds, 0.0);
    assert_eq!(report.performance.first_date, None);
    // Only the inverted bounce sub-score contributes.
    assert_eq!(report.performance.performance_score, 10);
    assert_eq!(report.performance.seo_score, 20);
    assert_eq!(report.trend.direction, TrendDirection::Stable);
}

#[test]
fn daily_traffic_groups_by_date_and_picks_top_article() {
    let metrics = vec![
        metric(1, 9, 50, 40, 0.0, 0.0),
        metric(1, 8, 100, 90, 0.0, 0.0),
        metric(3, 8, 300, 250, 0.0, 0.0),
        metric(2, 8, 300, 260, 0.0, 0.0),
    ];
    let titles = HashMap::from([(2, "Second".to_string())]);

    let daily = daily_traffic(&metrics, &titles);
    assert_eq!(daily.len(), 2);

    let first = &daily[0];
    assert_eq!(first.date, day(8));
    assert_eq!(first.total_page_views, 700);
    assert_eq!(first.total_unique_visitors, 600);
    assert!((first.avg_page_views - 233.33).abs() < 1e-9);
    assert_eq!(first.top_article.id, 2);
    assert_eq!(first.top_article.title, "Second");
    assert_eq!(first.top_article.views, 300);

    let second = &daily[1];
    assert_eq!(second.date, day(9));
    assert_eq!(second.top_article.id, 1);
    assert_eq!(second.top_article.title, "");
}

#[test]
fn dashboard_metrics_count_distinct_articles() {
    let metrics = vec![
        metric(1, 1, 10, 8, 0.0, 0.0),
        metric(1, 2, 20, 15, 0.0, 0.0),
        metric(2, 1, 30, 25, 0.0, 0.0),
    ];
    let dashboard = DashboardMetrics::from_metrics(&metrics);
    assert_eq!(dashboard.total_articles, 2);
    assert_eq!(dashboard.total_page_views, 60);
    assert_eq!(dashboard.total_unique_visitors, 48);
}

#[test]
fn traffic_sources_feed_organic_share() {
    let sources = vec![
        SourceMetrics {
            source: TrafficSource::Organic,
            page_views: 300,
            unique_visitors: 200,
            conversions: 5,
        },
        SourceMetrics {
            source: TrafficSource::Direct,
            page_views: 100,
            unique_visitors: 0,
            conversions: 3,
        },
    ];

    assert_eq!(organic_views(&sources), 300);
    assert!((sources[0].conversion_rate() - 2.5).abs() < 1e-9);
    assert_eq!(sources[1].conversion_rate(), 0.0);

    let shares = source_breakdown(&sources);
    assert!((shares[0].share_percent - 75.0).abs() < 1e-9);
    assert!((shares[1].share_percent - 25.0).abs() < 1e-9);
    assert!(source_breakdown(&[]).is_empty());
}

#[test]
fn labels_parse_case_insensitively() {
    assert_eq!(TrafficSource::from_label("Organic"), Some(TrafficSource::Organic));
    assert_eq!(TrafficSource::from_label("carrier-pigeon"), None);
    assert_eq!(TrafficSource::Email.label(), "email");
    assert_eq!(AnalyticsPeriod::from_label("QUARTER"), Some(AnalyticsPeriod::Quarter));
    assert_eq!(AnalyticsPeriod::Year.days(), 365);
}

#[test]
fn report_totals_saturate_instead_of_overflowing() {
    let series = vec![
        PageViewMetric::new(3, day(1), u64::MAX, u64::MAX),
        PageViewMetric::new(3, day(2), u64::MAX, u64::MAX),
    ];

    let report = ArticleReport::build(&Scorers::default(), 3, "", &series, 0, u64::MAX);
    assert_eq!(report.performance.total_views, u64::MAX);
    assert_eq!(report.performance.total_unique_visitors, u64::MAX);
    assert_eq!(report.engagement.return_visitor_rate, 0.0);
    assert!(report.performance.performance_score <= 100);
    assert!(report.performance.seo_score <= 100);
}

#[test]
fn daily_traffic_totals_saturate_instead_of_overflowing() {
    let metrics = vec![
        PageViewMetric::new(1, day(1), u64::MAX, u64::MAX),
        PageViewMetric::new(2, day(1), u64::MAX, u64::MAX),
    ];

    let daily = daily_traffic(&metrics, &HashMap::new());
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].total_page_views, u64::MAX);
    assert_eq!(daily[0].total_unique_visitors, u64::MAX);
    assert_eq!(daily[0].top_article.id, 1);
}

#[test]
fn dashboard_totals_saturate_instead_of_overflowing() {
    let metrics = vec![
        PageViewMetric::new(1, day(1), u64::MAX, u64::MAX),
        PageViewMetric::new(1, day(2), u64::MAX, u64::MAX),
    ];

    let dashboard = DashboardMetrics::from_metrics(&metrics);
    assert_eq!(dashboard.total_articles, 1);
    assert_eq!(dashboard.total_page_views, u64::MAX);
    assert_eq!(dashboard.total_unique_visitors, u64::MAX);
}

#[test]
fn source_totals_saturate_instead_of_overflowing() {
    let sources = vec![
        SourceMetrics {
            source: TrafficSource::Organic,
            page_views: u64::MAX,
            unique_visitors: 1,
            conversions: 0,
        },
        SourceMetrics {
            source: TrafficSource::Organic,
            page_views: u64::MAX,
            unique_visitors: 1,
            conversions: 0,
        },
    ];

    assert_eq!(organic_views(&sources), u64::MAX);
    let shares = source_breakdown(&sources);
    assert_eq!(shares.len(), 2);
    assert!(shares.iter().all(|share| share.share_percent == 100.0));
}
