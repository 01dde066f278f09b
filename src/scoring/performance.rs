use serde::{Deserialize, Serialize};

use crate::scoring::normalize::{inverted_score, normalize};
use crate::scoring::weighted::WeightedScorer;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceWeights {
    pub views: f64,
    pub time: f64,
    pub likes: f64,
    pub bounce: f64,
}

impl Default for PerformanceWeights {
    fn default() -> Self {
        Self {
            views: 0.4,
            time: 0.3,
            likes: 0.2,
            bounce: 0.1,
        }
    }
}

impl PerformanceWeights {
    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.views, self.time, self.likes, self.bounce]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    pub views_saturation: f64,
    pub time_saturation_seconds: f64,
    pub likes_saturation: f64,
    pub weights: PerformanceWeights,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            views_saturation: 1000.0,
            time_saturation_seconds: 300.0,
            likes_saturation: 100.0,
            weights: PerformanceWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceBreakdown {
    pub view_score: f64,
    pub time_score: f64,
    pub like_score: f64,
    pub bounce_score: f64,
}

#[derive(Debug, Clone)]
pub struct PerformanceScorer {
    config: PerformanceConfig,
    weighted: WeightedScorer,
}

impl PerformanceScorer {
    pub fn new(config: PerformanceConfig) -> Self {
        let weighted = WeightedScorer::new(config.weights.to_vec());
        Self { config, weighted }
    }

    pub fn breakdown(
        &self,
        views: u64,
        avg_time_on_page_seconds: f64,
        likes: u64,
        bounce_rate_percent: f64,
    ) -> PerformanceBreakdown {
        PerformanceBreakdown {
            view_score: normalize(views as f64, self.config.views_saturation),
            time_score: normalize(avg_time_on_page_seconds, self.config.time_saturation_seconds),
            like_score: normalize(likes as f64, self.config.likes_saturation),
            bounce_score: inverted_score(bounce_rate_percent),
        }
    }

    pub fn score(
        &self,
        views: u64,
        avg_time_on_page_seconds: f64,
        likes: u64,
        bounce_rate_percent: f64,
    ) -> u8 {
        let parts = self.breakdown(views, avg_time_on_page_seconds, likes, bounce_rate_percent);
        self.weighted.score(&[
            parts.view_score,
            parts.time_score,
            parts.like_score,
            parts.bounce_score,
        ])
    }
}

impl Default for PerformanceScorer {
    fn default() -> Self {
        Self::new(PerformanceConfig::default())
    }
}

/// Article performance on 0–100 using the default saturation points and weights.
pub fn performance_score(
    views: u64,
    avg_time_on_page_seconds: f64,
    likes: u64,
    bounce_rate_percent: f64,
) -> u8 {
    PerformanceScorer::default().score(views, avg_time_on_page_seconds, likes, bounce_rate_percent)
}
