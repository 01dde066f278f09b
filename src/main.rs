use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use pubmetrics::ads::{ad_metrics, generate_ad_code, validate_publisher_id};
use pubmetrics::config::AnalyticsConfig;
use pubmetrics::error::AppError;
use pubmetrics::report::{ArticleReport, Scorers};
use pubmetrics::scoring::engagement;
use pubmetrics::server::{self, ServeOptions};
use pubmetrics::{format_float, format_number, format_percent, format_usd, telemetry, PageViewMetric};

#[derive(Parser)]
#[command(name = "pubmetrics", about = "Traffic, SEO and ad revenue scoring")]
struct Cli {
    /// Path to analytics.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Performance and SEO scores for one article
    Score(ScoreArgs),
    Engagement(EngagementArgs),
    /// Trend direction for a JSON array of daily metrics
    Trend(InputArgs),
    /// Full report for one article from a JSON array of daily metrics
    Report(ReportArgs),
    Ads(AdsArgs),
    AdCode(AdCodeArgs),
    ValidateId(ValidateIdArgs),
    /// Write the effective configuration to a TOML file
    InitConfig(InitConfigArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    #[arg(long)]
    views: u64,
    #[arg(long, default_value_t = 0.0)]
    avg_time: f64,
    #[arg(long, default_value_t = 0)]
    likes: u64,
    #[arg(long, default_value_t = 0.0)]
    bounce_rate: f64,
    #[arg(long)]
    organic_views: Option<u64>,
}

#[derive(Args, Debug, Clone)]
struct EngagementArgs {
    #[arg(long)]
    page_views: u64,
    #[arg(long)]
    unique_visitors: u64,
    #[arg(long, default_value_t = 0.0)]
    avg_time: f64,
    #[arg(long, default_value_t = 0.0)]
    bounce_rate: f64,
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// JSON file; stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    #[arg(long)]
    article_id: u64,
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long, default_value_t = 0)]
    likes: u64,
    #[arg(long, default_value_t = 0)]
    organic_views: u64,
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Args, Debug, Clone)]
struct AdsArgs {
    #[arg(long)]
    impressions: u64,
    #[arg(long)]
    clicks: u64,
    #[arg(long)]
    revenue: f64,
}

#[derive(Args, Debug, Clone)]
struct AdCodeArgs {
    #[arg(long)]
    publisher_id: Option<String>,
    #[arg(long)]
    slot: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct ValidateIdArgs {
    publisher_id: String,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/analytics.toml")]
    path: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long)]
    web_root: Option<String>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let (config, config_path) = AnalyticsConfig::load(cli.config)?;
    telemetry::init(&config.log_level)?;
    tracing::debug!(path = ?config_path, "configuration loaded");

    let scorers = Scorers::from_config(&config);
    match cli.command {
        Command::Score(args) => run_score(&scorers, args),
        Command::Engagement(args) => run_engagement(args),
        Command::Trend(args) => run_trend(&scorers, args),
        Command::Report(args) => run_report(&scorers, args),
        Command::Ads(args) => run_ads(args),
        Command::AdCode(args) => run_ad_code(&config, args),
        Command::ValidateId(args) => run_validate_id(args),
        Command::InitConfig(args) => {
            config.write(&args.path)?;
            println!("Wrote {}", args.path.display());
            Ok(())
        }
        Command::Serve(args) => {
            let options = ServeOptions {
                host: args.host,
                port: args.port,
                web_root: args.web_root,
            };
            server::serve(options, config).await
        }
    }
}

fn run_score(scorers: &Scorers, args: ScoreArgs) -> Result<(), AppError> {
    let performance = scorers
        .performance
        .breakdown(args.views, args.avg_time, args.likes, args.bounce_rate);
    let score = scorers
        .performance
        .score(args.views, args.avg_time, args.likes, args.bounce_rate);

    println!("Performance score: {}", score);
    println!(
        "  views {} | time {} | likes {} | bounce {}",
        format_float(performance.view_score, 1),
        format_float(performance.time_score, 1),
        format_float(performance.like_score, 1),
        format_float(performance.bounce_score, 1)
    );

    if let Some(organic) = args.organic_views {
        let seo = scorers
            .seo
            .score(organic, args.views, args.avg_time, args.bounce_rate);
        let parts = scorers
            .seo
            .breakdown(organic, args.views, args.avg_time, args.bounce_rate);
        println!("SEO score: {}", seo);
        println!(
            "  organic share {} | engagement {} | bounce {}",
            format_percent(parts.organic_share_percent),
            format_float(parts.engagement_score, 1),
            format_float(parts.bounce_score, 1)
        );
    }
    Ok(())
}

fn run_engagement(args: EngagementArgs) -> Result<(), AppError> {
    let metrics = engagement(
        args.page_views,
        args.unique_visitors,
        args.avg_time,
        args.bounce_rate,
    );
    println!("Engagement rate: {}", format_percent(metrics.engagement_rate));
    println!("Return visitor rate: {}", format_percent(metrics.return_visitor_rate));
    println!("Avg session duration: {}s", metrics.avg_session_duration);
    Ok(())
}

fn run_trend(scorers: &Scorers, args: InputArgs) -> Result<(), AppError> {
    let series = read_series(args.input.as_deref())?;
    let report = scorers.trend.analyze(&series);
    println!(
        "Trend: {} ({}) over {} points",
        report.direction.label(),
        format_percent(report.percent_change),
        series.len()
    );
    Ok(())
}

fn run_report(scorers: &Scorers, args: ReportArgs) -> Result<(), AppError> {
    let series = read_series(args.input.input.as_deref())?;
    let report = ArticleReport::build(
        scorers,
        args.article_id,
        &args.title,
        &series,
        args.likes,
        args.organic_views,
    );
    let performance = &report.performance;

    println!("Article {} {}", performance.article_id, performance.title);
    println!(
        "Views: {} ({} unique)",
        format_number(performance.total_views as f64),
        format_number(performance.total_unique_visitors as f64)
    );
    println!(
        "Avg time on page: {}s | bounce {}",
        format_float(performance.avg_time_on_page_seconds, 1),
        format_percent(performance.bounce_rate_percent)
    );
    println!(
        "Performance score: {} | SEO score: {}",
        performance.performance_score, performance.seo_score
    );
    println!(
        "Engagement {} | return visitors {} | session {}s",
        format_percent(report.engagement.engagement_rate),
        format_percent(report.engagement.return_visitor_rate),
        report.engagement.avg_session_duration
    );
    println!(
        "Trend: {} ({})",
        report.trend.direction.label(),
        format_percent(report.trend.percent_change)
    );
    Ok(())
}

fn run_ads(args: AdsArgs) -> Result<(), AppError> {
    let metrics = ad_metrics(args.impressions, args.clicks, args.revenue);
    println!("CTR: {}", format_percent(metrics.ctr_percent));
    println!("CPM: {}", format_usd(metrics.cpm_usd));
    Ok(())
}

fn run_ad_code(config: &AnalyticsConfig, args: AdCodeArgs) -> Result<(), AppError> {
    let publisher_id = args
        .publisher_id
        .or_else(|| config.ads.publisher_id.clone())
        .ok_or_else(|| AppError::invalid("missing publisher id: pass --publisher-id or set ADSENSE_PUBLISHER_ID"))?;
    if !validate_publisher_id(&publisher_id) {
        return Err(AppError::invalid(format!("invalid publisher id: {}", publisher_id)));
    }
    let slot = args
        .slot
        .or_else(|| config.ads.default_ad_slot.clone())
        .ok_or_else(|| AppError::invalid("missing ad slot: pass --slot or set ADSENSE_AD_SLOT"))?;

    println!("{}", generate_ad_code(&publisher_id, &slot));
    Ok(())
}

fn run_validate_id(args: ValidateIdArgs) -> Result<(), AppError> {
    if validate_publisher_id(&args.publisher_id) {
        println!("valid");
        Ok(())
    } else {
        Err(AppError::invalid(format!("invalid publisher id: {}", args.publisher_id)))
    }
}

fn read_series(path: Option<&Path>) -> Result<Vec<PageViewMetric>, AppError> {
    let payload = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    if payload.trim().is_empty() {
        return Err(AppError::invalid("missing metrics: pass --input or pipe JSON to stdin"));
    }
    Ok(serde_json::from_str(&payload)?)
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
