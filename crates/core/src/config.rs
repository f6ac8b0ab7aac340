//! Forecast calibration.

use serde::{Deserialize, Serialize};

/// Calibrated constants for the completion forecast.
///
/// Velocities are expressed in effort credits per day, where one credit
/// is `credit_divisor` minutes of lesson content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Inertia constant C, in virtual days of prior-rate progress
    pub inertia: f64,

    /// Baseline velocity assumed before any observation
    pub velocity_prior: f64,

    /// Minutes of lesson content per credit
    pub credit_divisor: f64,

    /// Floor applied to a single lesson's credit
    pub min_lesson_credit: f64,

    /// EWMA smoothing factor for the maturity phase
    pub ewma_alpha: f64,

    /// Number of recent daily samples kept for the median filter
    pub median_window: usize,

    /// Last active day still treated as cold start
    pub cold_start_days: u32,

    /// Learning rate for weekday seasonal indices
    pub seasonality_learning_rate: f64,

    /// Smallest velocity considered non-zero
    pub epsilon: f64,

    /// Longest day-by-day projection before giving up
    pub projection_horizon_days: u32,

    /// Days reported when the velocity is effectively zero
    pub stalled_fallback_days: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            inertia: 7.0,
            velocity_prior: 5.0,
            credit_divisor: 15.0,
            min_lesson_credit: 0.1,
            ewma_alpha: 0.2,
            median_window: 3,
            cold_start_days: 14,
            seasonality_learning_rate: 0.05,
            epsilon: 0.1,
            projection_horizon_days: 730,
            stalled_fallback_days: 365,
        }
    }
}

impl ForecastConfig {
    /// Set the inertia constant.
    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }

    /// Set the prior velocity.
    pub fn with_prior(mut self, velocity_prior: f64) -> Self {
        self.velocity_prior = velocity_prior;
        self
    }

    /// Set the cold start window.
    pub fn with_cold_start_days(mut self, days: u32) -> Self {
        self.cold_start_days = days;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_calibration() {
        let config = ForecastConfig::default();
        assert_eq!(config.inertia, 7.0);
        assert_eq!(config.velocity_prior, 5.0);
        assert_eq!(config.credit_divisor, 15.0);
        assert_eq!(config.median_window, 3);
        assert_eq!(config.cold_start_days, 14);
    }

    #[test]
    fn test_builder_setters() {
        let config = ForecastConfig::default()
            .with_inertia(3.0)
            .with_prior(4.5)
            .with_cold_start_days(7);
        assert_eq!(config.inertia, 3.0);
        assert_eq!(config.velocity_prior, 4.5);
        assert_eq!(config.cold_start_days, 7);
        assert_eq!(config.epsilon, 0.1);
    }
}
