pub mod engagement;
pub mod normalize;
pub mod performance;
pub mod seo;
pub mod weighted;

pub use engagement::{engagement, EngagementMetrics};
pub use normalize::{clamp_score, inverted_score, normalize, ratio_or_zero};
pub use performance::{performance_score, PerformanceBreakdown, PerformanceConfig, PerformanceScorer, PerformanceWeights};
pub use seo::{seo_score, SeoBreakdown, SeoConfig, SeoScorer, SeoWeights};
pub use weighted::{is_convex, weighted_sum, WeightedScorer};
