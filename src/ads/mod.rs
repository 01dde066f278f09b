pub mod adsense;
pub mod affiliate;
pub mod metrics;

use serde::{Deserialize, Serialize};

pub use adsense::{generate_ad_code, validate_publisher_id, PUBLISHER_PREFIX};
pub use affiliate::{generate_affiliate_link, AffiliateLink};
pub use metrics::{ad_metrics, revenue_stats, AdMetrics, AdRevenueMetric, RevenueStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdPosition {
    Header,
    Sidebar,
    ArticleTop,
    ArticleMiddle,
    ArticleBottom,
    Footer,
}

impl AdPosition {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "header" => Some(AdPosition::Header),
            "sidebar" => Some(AdPosition::Sidebar),
            "article_top" => Some(AdPosition::ArticleTop),
            "article_middle" => Some(AdPosition::ArticleMiddle),
            "article_bottom" => Some(AdPosition::ArticleBottom),
            "footer" => Some(AdPosition::Footer),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdPosition::Header => "header",
            AdPosition::Sidebar => "sidebar",
            AdPosition::ArticleTop => "article_top",
            AdPosition::ArticleMiddle => "article_middle",
            AdPosition::ArticleBottom => "article_bottom",
            AdPosition::Footer => "footer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdFormat {
    Display,
    Native,
    Video,
    Responsive,
}

impl AdFormat {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "display" | "banner" => Some(AdFormat::Display),
            "native" => Some(AdFormat::Native),
            "video" => Some(AdFormat::Video),
            "responsive" | "auto" => Some(AdFormat::Responsive),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdFormat::Display => "display",
            AdFormat::Native => "native",
            AdFormat::Video => "video",
            AdFormat::Responsive => "responsive",
        }
    }
}
