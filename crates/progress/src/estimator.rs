//! Completion time estimation.
//!
//! The blended velocity treats the inertia constant C as C virtual days
//! of progress at the prior rate:
//!
//! ```text
//! velocity = (C * prior + completed) / (C + days_active)
//! ```

use chrono::Days;
use pace_core::{Date, ForecastConfig};
use tracing::debug;

use crate::error::{EstimateError, Result};

/// Blend the prior rate with observed progress.
///
/// `inertia + days_active` must be positive; with `inertia > 0` and
/// `days_active >= 1` it always is.
pub fn velocity(inertia: f64, prior: f64, completed_credits: f64, days_active: u32) -> f64 {
    (inertia * prior + completed_credits) / (inertia + f64::from(days_active))
}

/// Whole days needed to finish `remaining_credits` at `velocity`, rounded up.
pub fn days_remaining(remaining_credits: f64, velocity: f64) -> Result<u32> {
    if !velocity.is_finite() || velocity <= 0.0 {
        return Err(EstimateError::NonPositiveVelocity(velocity));
    }

    let days = (remaining_credits / velocity).ceil().max(0.0);
    if !days.is_finite() || days > f64::from(u32::MAX) {
        return Err(EstimateError::DayCountOverflow(days));
    }

    Ok(days as u32)
}

/// `base_date` plus `days` calendar days.
pub fn completion_date(base_date: Date, days: u32) -> Result<Date> {
    let days = u64::from(days);
    base_date
        .checked_add_days(Days::new(days))
        .ok_or(EstimateError::DateOutOfRange { base: base_date, days })
}

/// Signed number of calendar days from `base_date` to `target_date`.
pub fn target_delta(base_date: Date, target_date: Date) -> i64 {
    target_date.signed_duration_since(base_date).num_days()
}

/// One evaluated estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Blended velocity (credits/day)
    pub velocity: f64,

    /// Days until completion
    pub days_remaining: u32,

    /// Projected completion date
    pub completion_date: Date,
}

/// Result of inverting the velocity formula for completed credits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackSolve {
    /// Days between base and target
    pub target_delta: i64,

    /// Velocity that finishes exactly on the target
    pub velocity_required: f64,

    /// Completed credits that would yield that velocity
    pub required_credits: f64,

    /// Completed credits actually observed
    pub actual_credits: f64,
}

impl BackSolve {
    /// Observed minus required credits. Positive means more progress
    /// than the target date implies.
    pub fn difference(&self) -> f64 {
        self.actual_credits - self.required_credits
    }
}

/// Completion time estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionEstimator {
    inertia: f64,
    prior: f64,
}

impl CompletionEstimator {
    /// Create an estimator with explicit inertia and prior.
    pub fn new(inertia: f64, prior: f64) -> Self {
        Self { inertia, prior }
    }

    /// Create an estimator from the forecast calibration.
    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.inertia, config.velocity_prior)
    }

    /// Same estimator with a different prior.
    pub fn with_prior(self, prior: f64) -> Self {
        Self { prior, ..self }
    }

    /// Inertia constant.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Prior velocity.
    pub fn prior(&self) -> f64 {
        self.prior
    }

    /// Blended velocity for the given progress.
    pub fn velocity(&self, completed_credits: f64, days_active: u32) -> f64 {
        velocity(self.inertia, self.prior, completed_credits, days_active)
    }

    /// Estimate the completion date from `base_date`.
    pub fn estimate(
        &self,
        completed_credits: f64,
        remaining_credits: f64,
        days_active: u32,
        base_date: Date,
    ) -> Result<Estimate> {
        let velocity = self.velocity(completed_credits, days_active);
        let days_remaining = days_remaining(remaining_credits, velocity)?;
        let completion_date = completion_date(base_date, days_remaining)?;

        debug!(
            days_active,
            prior = self.prior,
            velocity,
            days_remaining,
            %completion_date,
            "Estimated completion"
        );

        Ok(Estimate {
            velocity,
            days_remaining,
            completion_date,
        })
    }

    /// Find the completed credits that would land exactly on `target_date`.
    pub fn back_solve(
        &self,
        completed_credits: f64,
        remaining_credits: f64,
        days_active: u32,
        base_date: Date,
        target_date: Date,
    ) -> Result<BackSolve> {
        let delta = target_delta(base_date, target_date);
        if delta <= 0 {
            return Err(EstimateError::TargetNotAfterBase {
                base: base_date,
                target: target_date,
            });
        }

        let velocity_required = remaining_credits / delta as f64;
        let required_credits =
            velocity_required * (self.inertia + f64::from(days_active)) - self.inertia * self.prior;

        debug!(delta, velocity_required, required_credits, "Back-solved completed credits");

        Ok(BackSolve {
            target_delta: delta,
            velocity_required,
            required_credits,
            actual_credits: completed_credits,
        })
    }
}

impl Default for CompletionEstimator {
    fn default() -> Self {
        Self::from_config(&ForecastConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_velocity_reference_scenario() {
        let v = velocity(7.0, 5.0, 2.26, 6);
        assert!((v - 37.26 / 13.0).abs() < 1e-12);
        assert!((v - 2.8662).abs() < 1e-4);
    }

    #[test]
    fn test_velocity_positive_with_positive_prior() {
        for days_active in 1..=60 {
            assert!(velocity(7.0, 0.5, 0.0, days_active) > 0.0);
        }
    }

    #[test]
    fn test_velocity_non_increasing_when_prior_dominates() {
        // prior 5.0 exceeds completed/days_active for every d below
        for d in 1..30 {
            let now = velocity(7.0, 5.0, 2.26, d);
            let next = velocity(7.0, 5.0, 2.26, d + 1);
            assert!(next <= now, "velocity rose from d={} to d={}", d, d + 1);
        }
    }

    #[test]
    fn test_velocity_rises_with_completed_credits() {
        let slow = velocity(7.0, 1.0, 3.0, 6);
        let fast = velocity(7.0, 1.0, 100.0, 6);
        assert!(fast > slow);
        assert!(fast > 1.0);
        assert!(slow < 1.0);
    }

    #[test]
    fn test_days_remaining_reference_scenario() {
        let v = velocity(7.0, 5.0, 2.26, 6);
        assert_eq!(days_remaining(205.65, v).unwrap(), 72);
    }

    #[test]
    fn test_days_remaining_ceiling_contract() {
        for (remaining, v) in [(205.65, 2.8662), (10.0, 3.0), (9.0, 3.0), (0.5, 2.0), (100.0, 0.7)] {
            let n = days_remaining(remaining, v).unwrap();
            assert!(remaining <= f64::from(n) * v);
            assert!(remaining > f64::from(n - 1) * v);
        }
    }

    #[test]
    fn test_days_remaining_rejects_zero_velocity() {
        assert_eq!(
            days_remaining(10.0, 0.0),
            Err(EstimateError::NonPositiveVelocity(0.0))
        );
        assert!(days_remaining(10.0, -1.0).is_err());
        assert!(days_remaining(10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_completion_date_rolls_over_february() {
        assert_eq!(completion_date(date(2026, 1, 19), 72).unwrap(), date(2026, 4, 1));
        assert_eq!(completion_date(date(2026, 1, 19), 71).unwrap(), date(2026, 3, 31));
        assert_eq!(completion_date(date(2026, 12, 30), 3).unwrap(), date(2027, 1, 2));
    }

    #[test]
    fn test_completion_date_out_of_range() {
        assert_eq!(
            completion_date(Date::MAX, 1),
            Err(EstimateError::DateOutOfRange { base: Date::MAX, days: 1 })
        );
    }

    #[test]
    fn test_target_delta() {
        assert_eq!(target_delta(date(2026, 1, 19), date(2026, 4, 1)), 72);
        assert_eq!(target_delta(date(2026, 1, 14), date(2026, 4, 1)), 77);
        assert_eq!(target_delta(date(2026, 4, 1), date(2026, 1, 19)), -72);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let estimator = CompletionEstimator::default();
        let a = estimator.estimate(2.26, 205.65, 6, date(2026, 1, 19)).unwrap();
        let b = estimator.estimate(2.26, 205.65, 6, date(2026, 1, 19)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.days_remaining, 72);
        assert_eq!(a.completion_date, date(2026, 4, 1));
    }

    #[test]
    fn test_back_solve_reference_scenario() {
        let estimator = CompletionEstimator::new(7.0, 5.0);
        let solve = estimator
            .back_solve(2.26, 205.65, 6, date(2026, 1, 19), date(2026, 4, 1))
            .unwrap();

        assert_eq!(solve.target_delta, 72);
        assert!((solve.velocity_required - 2.85625).abs() < 1e-9);
        assert!((solve.required_credits - 2.13125).abs() < 1e-9);
        assert!((solve.difference() - 0.12875).abs() < 1e-9);
    }

    #[test]
    fn test_back_solve_rejects_target_not_after_base() {
        let estimator = CompletionEstimator::default();
        let same = estimator.back_solve(2.26, 205.65, 6, date(2026, 1, 19), date(2026, 1, 19));
        assert!(matches!(same, Err(EstimateError::TargetNotAfterBase { .. })));
    }

    #[test]
    fn test_with_prior_keeps_inertia() {
        let estimator = CompletionEstimator::new(7.0, 5.0).with_prior(3.5);
        assert_eq!(estimator.inertia(), 7.0);
        assert_eq!(estimator.prior(), 3.5);
    }
}
