use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::services::{ServeDir, ServeFile};

use crate::ads::{ad_metrics, generate_ad_code, revenue_stats, validate_publisher_id, AdMetrics};
use crate::api::{
    AdCodeRequest, AdCodeResponse, AdMetricsRequest, AffiliateRequest, AffiliateResponse,
    ArticleReportRequest, DashboardRequest, DashboardResponse, EngagementRequest, ScoreRequest,
    ScoreResponse, TrendRequest, TrendResponse, ValidateQuery, ValidateResponse,
};
use crate::config::AnalyticsConfig;
use crate::error::AppError;
use crate::report::{daily_traffic, ArticleReport, DashboardMetrics, Scorers};
use crate::scoring::{engagement, EngagementMetrics};

#[derive(Clone)]
pub struct AppState {
    config: Arc<AnalyticsConfig>,
    scorers: Arc<Scorers>,
}

impl AppState {
    pub fn new(config: AnalyticsConfig) -> Self {
        let scorers = Scorers::from_config(&config);
        Self {
            config: Arc::new(config),
            scorers: Arc::new(scorers),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub web_root: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/scores", post(scores_handler))
        .route("/api/engagement", post(engagement_handler))
        .route("/api/trend", post(trend_handler))
        .route("/api/articles/report", post(article_report_handler))
        .route("/api/dashboard", post(dashboard_handler))
        .route("/api/ads/metrics", post(ad_metrics_handler))
        .route("/api/ads/validate", get(validate_handler))
        .route("/api/ads/code", post(ad_code_handler))
        .route("/api/ads/affiliate", post(affiliate_handler))
        .with_state(state)
}

pub async fn serve(options: ServeOptions, config: AnalyticsConfig) -> Result<(), AppError> {
    let mut app = router(AppState::new(config));

    if let Some(web_root) = options.web_root.as_deref() {
        let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
        let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));
        app = app.fallback_service(static_service);
        tracing::info!(web_root, "serving dashboard assets");
    }

    let addr: SocketAddr = format!("{}:{}", options.host, options.port)
        .parse()
        .map_err(|err| AppError::Server(format!("invalid bind address: {}", err)))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "analytics api listening");

    axum::serve(listener, app)
        .await
        .map_err(|err| AppError::Server(err.to_string()))
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn scores_handler(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Json<ScoreResponse> {
    let performance = state.scorers.performance.breakdown(
        request.views,
        request.avg_time_on_page_seconds,
        request.likes,
        request.bounce_rate_percent,
    );
    let performance_score = state.scorers.performance.score(
        request.views,
        request.avg_time_on_page_seconds,
        request.likes,
        request.bounce_rate_percent,
    );

    let (seo_score, seo) = match request.organic_views {
        Some(organic) => {
            let total = request.total_views.unwrap_or(request.views);
            let breakdown = state.scorers.seo.breakdown(
                organic,
                total,
                request.avg_time_on_page_seconds,
                request.bounce_rate_percent,
            );
            let score = state.scorers.seo.score(
                organic,
                total,
                request.avg_time_on_page_seconds,
                request.bounce_rate_percent,
            );
            (Some(score), Some(breakdown))
        }
        None => (None, None),
    };

    tracing::debug!(performance_score, ?seo_score, "scored article");
    Json(ScoreResponse {
        performance_score,
        performance,
        seo_score,
        seo,
    })
}

async fn engagement_handler(Json(request): Json<EngagementRequest>) -> Json<EngagementMetrics> {
    Json(engagement(
        request.page_views,
        request.unique_visitors,
        request.avg_time_on_page_seconds,
        request.bounce_rate_percent,
    ))
}

async fn trend_handler(
    State(state): State<AppState>,
    Json(request): Json<TrendRequest>,
) -> Json<TrendResponse> {
    let report = state.scorers.trend.analyze(&request.series);
    tracing::debug!(
        points = request.series.len(),
        direction = report.direction.label(),
        "analyzed trend"
    );
    Json(TrendResponse {
        direction: report.direction,
        percent_change: report.percent_change,
        points: request.series.len(),
        window_days: state.scorers.trend.window_days(),
    })
}

async fn article_report_handler(
    State(state): State<AppState>,
    Json(request): Json<ArticleReportRequest>,
) -> Json<ArticleReport> {
    let report = ArticleReport::build(
        &state.scorers,
        request.article_id,
        &request.title,
        &request.series,
        request.likes,
        request.organic_views(),
    );
    Json(report)
}

async fn dashboard_handler(
    Json(request): Json<DashboardRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    let period = request.period()?;
    let revenue = request
        .as_of()
        .map(|as_of| revenue_stats(&request.revenue, period, as_of));

    Ok(Json(DashboardResponse {
        metrics: DashboardMetrics::from_metrics(&request.metrics),
        daily: daily_traffic(&request.metrics, &request.titles),
        revenue,
    }))
}

async fn ad_metrics_handler(Json(request): Json<AdMetricsRequest>) -> Json<AdMetrics> {
    Json(ad_metrics(request.impressions, request.clicks, request.revenue_usd))
}

async fn validate_handler(Query(query): Query<ValidateQuery>) -> Json<ValidateResponse> {
    let valid = validate_publisher_id(&query.publisher_id);
    if !valid {
        tracing::debug!(publisher_id = %query.publisher_id, "rejected publisher id");
    }
    Json(ValidateResponse {
        publisher_id: query.publisher_id,
        valid,
    })
}

async fn ad_code_handler(
    State(state): State<AppState>,
    Json(request): Json<AdCodeRequest>,
) -> Result<Json<AdCodeResponse>, AppError> {
    let publisher_id = request
        .publisher_id
        .or_else(|| state.config.ads.publisher_id.clone())
        .ok_or_else(|| AppError::invalid("publisher_id is required"))?;
    if !validate_publisher_id(&publisher_id) {
        tracing::warn!(%publisher_id, "ad code requested for invalid publisher id");
        return Err(AppError::invalid(format!("invalid publisher id: {}", publisher_id)));
    }

    let ad_slot = request
        .ad_slot
        .or_else(|| state.config.ads.default_ad_slot.clone())
        .filter(|slot| !slot.trim().is_empty())
        .ok_or_else(|| AppError::invalid("ad_slot is required"))?;

    let code = generate_ad_code(&publisher_id, &ad_slot);
    Ok(Json(AdCodeResponse {
        publisher_id,
        ad_slot,
        code,
    }))
}

async fn affiliate_handler(
    State(state): State<AppState>,
    Json(request): Json<AffiliateRequest>,
) -> Result<Json<AffiliateResponse>, AppError> {
    if !state.config.ads.enable_affiliate_links {
        return Err(AppError::invalid("affiliate links are disabled"));
    }
    let url = state
        .config
        .ads
        .affiliate_url(&request.link, &request.affiliate_id, &request.product_id);
    if url.is_none() {
        tracing::debug!(link_id = %request.link.id, "affiliate link inactive");
    }
    Ok(Json(AffiliateResponse {
        link_id: request.link.id,
        url,
    }))
}
