use crate::round_half_up;
use crate::scoring::normalize::clamp_score;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Combines 0–100 sub-scores with fixed weights into one 0–100 integer score.
#[derive(Debug, Clone)]
pub struct WeightedScorer {
    weights: Vec<f64>,
}

impl WeightedScorer {
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weighted sum before rounding. Values are clamped before weighting and
    /// the sum is clamped again, so a misconfigured weight set still lands on
    /// the 0–100 scale.
    pub fn raw(&self, values: &[f64]) -> f64 {
        let pairs: Vec<(f64, f64)> = values
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
            .collect();
        weighted_sum(&pairs)
    }

    pub fn score(&self, values: &[f64]) -> u8 {
        round_half_up(self.raw(values)) as u8
    }
}

/// Sum of `value * weight` over `(value, weight)` pairs, on the 0–100 scale.
pub fn weighted_sum(pairs: &[(f64, f64)]) -> f64 {
    let mut score = 0.0;
    for (value, weight) in pairs {
        score += clamp_score(*value) * weight;
    }
    clamp_score(score)
}

/// True when every weight is non-negative and they sum to 1.0.
pub fn is_convex(weights: &[f64]) -> bool {
    if weights.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
        return false;
    }
    let total: f64 = weights.iter().sum();
    (total - 1.0).abs() <= WEIGHT_TOLERANCE
}
