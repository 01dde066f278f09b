//! Traffic direction over a chronologically ordered series.
//!
//! The series is split at `len / 2`; the mean page views of the second half
//! are compared with the first. With an odd length the extra point falls in
//! the second half. Order is the caller's contract: the analyzer never sorts.

use serde::{Deserialize, Serialize};

use crate::scoring::ratio_or_zero;
use crate::{round_to, PageViewMetric};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn label(self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub direction: TrendDirection,
    /// Percent, rounded to 2 dp.
    pub percent_change: f64,
}

impl TrendReport {
    pub fn stable() -> Self {
        Self {
            direction: TrendDirection::Stable,
            percent_change: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendConfig {
    pub threshold_percent: f64,
    pub window_days: u32,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            threshold_percent: 5.0,
            window_days: 7,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    pub fn window_days(&self) -> u32 {
        self.config.window_days
    }

    pub fn analyze(&self, series: &[PageViewMetric]) -> TrendReport {
        let views: Vec<u64> = series.iter().map(|metric| metric.page_views).collect();
        self.analyze_counts(&views)
    }

    pub fn analyze_counts(&self, views: &[u64]) -> TrendReport {
        if views.len() < 2 {
            return TrendReport::stable();
        }

        let (first, second) = views.split_at(views.len() / 2);
        let avg_first = mean(first);
        let avg_second = mean(second);

        // No baseline traffic: a percentage change is undefined.
        if avg_first == 0.0 {
            return TrendReport::stable();
        }

        let percent_change = ratio_or_zero(avg_second - avg_first, avg_first) * 100.0;
        TrendReport {
            direction: self.classify(percent_change),
            percent_change: round_to(percent_change, 2),
        }
    }

    /// Strictly beyond the threshold in either direction, else stable.
    pub fn classify(&self, percent_change: f64) -> TrendDirection {
        let threshold = self.config.threshold_percent;
        if percent_change > threshold {
            TrendDirection::Up
        } else if percent_change < -threshold {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        }
    }
}

/// Trend with the default 5% threshold.
///
/// `window_days` describes the series the caller pre-sliced; the split does
/// not depend on it.
pub fn analyze_trend(series: &[PageViewMetric], window_days: u32) -> TrendReport {
    TrendAnalyzer::new(TrendConfig {
        window_days,
        ..TrendConfig::default()
    })
    .analyze(series)
}

fn mean(values: &[u64]) -> f64 {
    let total: f64 = values.iter().map(|value| *value as f64).sum();
    ratio_or_zero(total, values.len() as f64)
}
