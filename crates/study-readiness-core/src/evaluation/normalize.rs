//! Mapping raw metrics onto a higher-is-better [0, 1] scale.
//!
//! Test metrics are compared with the user's own baseline mean; the check-in
//! answers use fixed anchors on their rating scales.

use serde::{Deserialize, Serialize};

/// Caffeine effect is considered fully worn off after this many minutes.
pub const CAFFEINE_HORIZON_MINUTES: u32 = 360;

/// Which direction of a raw metric counts as an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Score `value` against `baseline_mean`.
///
/// A zero baseline has no meaningful ratio and scores a neutral 0.5. Lower is
/// better: the mean scores 1.0, twice the mean 0.0. Higher is better: the
/// ratio itself, capped at 1.0.
pub fn normalize(value: f64, baseline_mean: f64, direction: Direction) -> f64 {
    if baseline_mean == 0.0 {
        return 0.5;
    }
    let ratio = value / baseline_mean;
    let score = match direction {
        Direction::LowerIsBetter => 2.0 - ratio,
        Direction::HigherIsBetter => ratio,
    };
    if score.is_nan() {
        return 0.5;
    }
    clamp01(score)
}

/// KSS 1 (very alert) scores 1.0, KSS 9 (very sleepy) scores 0.0.
pub fn sleepiness_score(kss: u8) -> f64 {
    clamp01(1.0 - (f64::from(kss) - 1.0) / 8.0)
}

/// Sleep quality on a 1-5 scale divided by 5.
pub fn sleep_quality_score(sleep_quality: u8) -> f64 {
    clamp01(f64::from(sleep_quality) / 5.0)
}

/// Stress 1 (relaxed) scores 1.0, stress 10 scores 0.0.
pub fn stress_score(stress: u8) -> f64 {
    clamp01(1.0 - (f64::from(stress) - 1.0) / 9.0)
}

/// Recent caffeine scores high; the score decays linearly to 0 at six hours.
pub fn caffeine_score(caffeine_minutes: u32) -> f64 {
    let minutes = caffeine_minutes.min(CAFFEINE_HORIZON_MINUTES);
    clamp01(1.0 - f64::from(minutes) / f64::from(CAFFEINE_HORIZON_MINUTES))
}
