use serde::{Deserialize, Serialize};

use crate::scoring::normalize::{clamp_score, inverted_score, normalize, ratio_or_zero};
use crate::scoring::weighted::WeightedScorer;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeoWeights {
    pub organic: f64,
    pub engagement: f64,
    pub bounce: f64,
}

impl Default for SeoWeights {
    fn default() -> Self {
        Self {
            organic: 0.5,
            engagement: 0.3,
            bounce: 0.2,
        }
    }
}

impl SeoWeights {
    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.organic, self.engagement, self.bounce]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeoConfig {
    pub time_saturation_seconds: f64,
    pub weights: SeoWeights,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            time_saturation_seconds: 180.0,
            weights: SeoWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeoBreakdown {
    pub organic_share_percent: f64,
    pub organic_score: f64,
    pub engagement_score: f64,
    pub bounce_score: f64,
}

#[derive(Debug, Clone)]
pub struct SeoScorer {
    config: SeoConfig,
    weighted: WeightedScorer,
}

impl SeoScorer {
    pub fn new(config: SeoConfig) -> Self {
        let weighted = WeightedScorer::new(config.weights.to_vec());
        Self { config, weighted }
    }

    pub fn breakdown(
        &self,
        organic_views: u64,
        total_views: u64,
        avg_time_on_page_seconds: f64,
        bounce_rate_percent: f64,
    ) -> SeoBreakdown {
        let organic_share_percent = ratio_or_zero(organic_views as f64, total_views as f64) * 100.0;
        SeoBreakdown {
            organic_share_percent,
            organic_score: clamp_score(organic_share_percent),
            engagement_score: normalize(avg_time_on_page_seconds, self.config.time_saturation_seconds),
            bounce_score: inverted_score(bounce_rate_percent),
        }
    }

    pub fn score(
        &self,
        organic_views: u64,
        total_views: u64,
        avg_time_on_page_seconds: f64,
        bounce_rate_percent: f64,
    ) -> u8 {
        let parts = self.breakdown(
            organic_views,
            total_views,
            avg_time_on_page_seconds,
            bounce_rate_percent,
        );
        self.weighted.score(&[parts.organic_score, parts.engagement_score, parts.bounce_score])
    }
}

impl Default for SeoScorer {
    fn default() -> Self {
        Self::new(SeoConfig::default())
    }
}

pub fn seo_score(
    organic_views: u64,
    total_views: u64,
    avg_time_on_page_seconds: f64,
    bounce_rate_percent: f64,
) -> u8 {
    SeoScorer::default().score(organic_views, total_views, avg_time_on_page_seconds, bounce_rate_percent)
}
