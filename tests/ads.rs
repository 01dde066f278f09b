use chrono::NaiveDate;
use pubmetrics::ads::{
    ad_metrics, generate_ad_code, generate_affiliate_link, revenue_stats, validate_publisher_id,
    AdFormat, AdPosition, AdRevenueMetric, AffiliateLink,
};
use pubmetrics::AnalyticsPeriod;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[test]
fn ad_metrics_zero_impressions() {
    let metrics = ad_metrics(0, 0, 0.0);
    assert_eq!(metrics.ctr_percent, 0.0);
    assert_eq!(metrics.cpm_usd, 0.0);

    let metrics = ad_metrics(0, 5, 10.0);
    assert_eq!(metrics.ctr_percent, 0.0);
    assert_eq!(metrics.cpm_usd, 0.0);
}

#[test]
fn ad_metrics_ctr_and_cpm() {
    let metrics = ad_metrics(1000, 50, 20.0);
    assert!((metrics.ctr_percent - 5.0).abs() < 1e-9);
    assert!((metrics.cpm_usd - 20.0).abs() < 1e-9);
}

#[test]
fn revenue_metric_derives_rates_from_counters() {
    let record = AdRevenueMetric::from_counters(day(1), 4000, 20, 6.0);
    assert!((record.ctr_percent - 0.5).abs() < 1e-9);
    assert!((record.cpm_usd - 1.5).abs() < 1e-9);

    let stale = AdRevenueMetric {
        ctr_percent: 99.0,
        cpm_usd: 99.0,
        ..record.clone()
    };
    assert_eq!(stale.recompute(), record);
}

#[test]
fn revenue_stats_cover_trailing_period() {
    let mut records: Vec<AdRevenueMetric> = (1..=10)
        .map(|d| AdRevenueMetric::from_counters(day(d), 1000, 10, 2.5))
        .collect();
    records.push(AdRevenueMetric::from_counters(day(12), 1000, 10, 100.0));

    let week = revenue_stats(&records, AnalyticsPeriod::Week, day(10));
    assert_eq!(week.from, day(4));
    assert_eq!(week.days_reported, 7);
    assert_eq!(week.total_impressions, 7000);
    assert_eq!(week.total_clicks, 70);
    assert!((week.total_revenue_usd - 17.5).abs() < 1e-9);
    assert!((week.ctr_percent - 1.0).abs() < 1e-9);
    assert!((week.cpm_usd - 2.5).abs() < 1e-9);

    let single = revenue_stats(&records, AnalyticsPeriod::Day, day(10));
    assert_eq!(single.days_reported, 1);
    assert_eq!(single.total_impressions, 1000);
}

#[test]
fn revenue_stats_without_records_are_zero() {
    let stats = revenue_stats(&[], AnalyticsPeriod::Month, day(31));
    assert_eq!(stats.total_impressions, 0);
    assert_eq!(stats.ctr_percent, 0.0);
    assert_eq!(stats.cpm_usd, 0.0);
}

#[test]
fn publisher_id_format() {
    assert!(validate_publisher_id("ca-pub-1234567890123456"));
    assert!(!validate_publisher_id("ca-pub-123"));
    assert!(!validate_publisher_id("pub-1234567890123456"));
    assert!(!validate_publisher_id("ca-pub-12345678901234567"));
    assert!(!validate_publisher_id(" ca-pub-1234567890123456"));
    assert!(!validate_publisher_id("ca-pub-123456789012345a"));
    assert!(!validate_publisher_id("ca-pub-١٢٣٤٥٦٧٨٩٠١٢٣٤٥٦"));
}

#[test]
fn ad_code_matches_loader_markup() {
    let expected = r#"<script async src="https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js?client=ca-pub-1234567890123456"
     crossorigin="anonymous"></script>
<!-- Article Ad Slot -->
<ins class="adsbygoogle"
     style="display:block"
     data-ad-client="ca-pub-1234567890123456"
     data-ad-slot="9876543210"
     data-ad-format="auto"
     data-full-width-responsive="true"></ins>
<script>
     (adsbygoogle = window.adsbygoogle || []).push({});
</script>"#;

    assert_eq!(generate_ad_code("1234567890123456", "9876543210"), expected);
}

#[test]
fn ad_code_accepts_prefixed_publisher_id() {
    let bare = generate_ad_code("1234567890123456", "42");
    let prefixed = generate_ad_code("ca-pub-1234567890123456", "42");
    assert_eq!(bare, prefixed);
    assert!(!prefixed.contains("ca-pub-ca-pub-"));
}

#[test]
fn affiliate_link_form_encodes_query_values() {
    let link = generate_affiliate_link("https://shop.example.com/p", "aff 1", "sku/9");
    assert_eq!(link, "https://shop.example.com/p?aff_id=aff+1&product_id=sku%2F9");

    let link = generate_affiliate_link("https://shop.example.com/p", "a&b=c", "x+y");
    assert_eq!(link, "https://shop.example.com/p?aff_id=a%26b%3Dc&product_id=x%2By");
}

#[test]
fn inactive_affiliate_link_yields_nothing() {
    let mut link = AffiliateLink {
        id: "kb-1".to_string(),
        title: "Mechanical keyboard".to_string(),
        url: "https://shop.example.com/kb".to_string(),
        category: "hardware".to_string(),
        commission_percent: 4.5,
        is_active: true,
    };
    assert_eq!(
        link.link_for("pub42", "kb-1").as_deref(),
        Some("https://shop.example.com/kb?aff_id=pub42&product_id=kb-1")
    );
    link.is_active = false;
    assert!(link.link_for("pub42", "kb-1").is_none());
}

#[test]
fn placement_vocabularies_parse_labels() {
    assert_eq!(AdPosition::from_label("article-middle"), Some(AdPosition::ArticleMiddle));
    assert_eq!(AdPosition::from_label("Footer"), Some(AdPosition::Footer));
    assert_eq!(AdPosition::from_label("popup"), None);
    assert_eq!(AdPosition::ArticleTop.label(), "article_top");
    assert_eq!(AdFormat::from_label("native"), Some(AdFormat::Native));
    assert_eq!(AdFormat::Responsive.label(), "responsive");
}

#[test]
fn revenue_window_clamps_at_earliest_date() {
    let records = vec![AdRevenueMetric::from_counters(NaiveDate::MIN, 2000, 10, 4.0)];

    let stats = revenue_stats(&records, AnalyticsPeriod::Year, NaiveDate::MIN);
    assert_eq!(stats.from, NaiveDate::MIN);
    assert_eq!(stats.to, NaiveDate::MIN);
    assert_eq!(stats.days_reported, 1);
    assert_eq!(stats.total_impressions, 2000);
    assert!((stats.cpm_usd - 2.0).abs() < 1e-9);
}
