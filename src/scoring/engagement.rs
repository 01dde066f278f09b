use serde::{Deserialize, Serialize};

use crate::scoring::normalize::{clamp_score, inverted_score, ratio_or_zero};
use crate::{round_half_up, round_to};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub engagement_rate: f64,
    pub return_visitor_rate: f64,
    /// Seconds.
    pub avg_session_duration: u64,
}

/// Engagement rates in percent (2 dp) and session duration in whole seconds.
///
/// Views beyond the unique-visitor count are treated as returning visits;
/// when there are fewer views than visitors the rate is 0, not negative.
pub fn engagement(
    page_views: u64,
    unique_visitors: u64,
    avg_time_on_page_seconds: f64,
    bounce_rate_percent: f64,
) -> EngagementMetrics {
    let engagement_rate = inverted_score(bounce_rate_percent);

    let repeat_views = page_views as f64 - unique_visitors as f64;
    let return_visitor_rate = clamp_score(ratio_or_zero(repeat_views, unique_visitors as f64) * 100.0);

    let duration = if avg_time_on_page_seconds.is_nan() {
        0.0
    } else {
        avg_time_on_page_seconds.max(0.0)
    };

    EngagementMetrics {
        engagement_rate: round_to(engagement_rate, 2),
        return_visitor_rate: round_to(return_visitor_rate, 2),
        avg_session_duration: round_half_up(duration) as u64,
    }
}
