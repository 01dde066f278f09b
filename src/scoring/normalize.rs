//! Sub-score normalization shared by every scorer.
//!
//! All sub-scores live on a 0–100 scale. Raw counters are mapped onto it
//! against a saturation point (the raw value that earns a full 100), and
//! anything outside the scale is clamped rather than rejected.

pub const MAX_SCORE: f64 = 100.0;

/// `numerator / denominator`, or `0.0` when the denominator is not a
/// positive finite number.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator.is_finite() && denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Clamps to `[0, 100]`; NaN maps to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, MAX_SCORE)
}

/// Maps `raw` onto 0–100 where `saturation_point` scores 100.
///
/// A non-positive saturation point is a configuration mistake; it yields 0
/// instead of failing so a scoring pass never aborts halfway.
pub fn normalize(raw: f64, saturation_point: f64) -> f64 {
    if !(saturation_point.is_finite() && saturation_point > 0.0) {
        return 0.0;
    }
    clamp_score(ratio_or_zero(raw, saturation_point) * MAX_SCORE)
}

/// Score for a percentage where lower is better (bounce rate).
pub fn inverted_score(percent: f64) -> f64 {
    clamp_score(MAX_SCORE - percent)
}
