//! Phased completion forecasting.
//!
//! Early on (`days_active <= cold_start_days`) the velocity is the
//! Bayesian blend from [`crate::estimator`]. Once a student has enough
//! history the engine switches to a cascade of filters:
//! - median over the recent daily credits (drops outliers and zero days)
//! - removal of the weekday seasonal factor
//! - EWMA against the previous velocity
//!
//! Daily updates also learn the weekday seasonal indices, and the
//! projection walks day by day applying those indices.

use chrono::Datelike;
use pace_core::{
    Date, Forecast, ForecastConfig, ForecastPhase, ForecastState, StudentProgress, DAYS_PER_WEEK,
};
use tracing::{debug, info, warn};

use crate::credits::days_active;
use crate::error::{EstimateError, Result};
use crate::estimator::{completion_date, days_remaining, velocity};

/// Completion forecast engine.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    /// Create an engine with the given calibration.
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Calibration in use.
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Phase for a student active for `days_active` days.
    pub fn phase_for(&self, days_active: u32) -> ForecastPhase {
        if days_active <= self.config.cold_start_days {
            ForecastPhase::ColdStart
        } else {
            ForecastPhase::Maturity
        }
    }

    /// Bayesian blend of the prior and observed credits.
    pub fn cold_start_velocity(&self, completed_credits: f64, days_active: u32) -> f64 {
        velocity(
            self.config.inertia,
            self.config.velocity_prior,
            completed_credits,
            days_active,
        )
    }

    /// Median-filtered EWMA velocity from a progress snapshot.
    pub fn maturity_velocity(&self, progress: &StudentProgress) -> f64 {
        let clean = if progress.recent_daily_credits.len() >= self.config.median_window {
            median(&progress.recent_daily_credits)
        } else {
            progress.completed_credits / f64::from(progress.days_active.max(1))
        };

        let previous = progress
            .previous_ewma_velocity
            .filter(|v| *v != 0.0)
            .unwrap_or(clean);

        self.ewma(clean, previous)
    }

    fn ewma(&self, input: f64, previous: f64) -> f64 {
        let alpha = self.config.ewma_alpha;
        alpha * input + (1.0 - alpha) * previous
    }

    /// Forecast directly from a progress snapshot, projecting from `base_date`.
    ///
    /// The velocity is floored at `epsilon` so a stalled student still gets
    /// a (distant) date.
    pub fn quick_forecast(&self, progress: &StudentProgress, base_date: Date) -> Result<Forecast> {
        let phase = self.phase_for(progress.days_active);
        let velocity = match phase {
            ForecastPhase::ColdStart => {
                self.cold_start_velocity(progress.completed_credits, progress.days_active)
            }
            ForecastPhase::Maturity => self.maturity_velocity(progress),
        };

        let days = days_remaining(progress.remaining_credits, velocity.max(self.config.epsilon))?;
        let date = completion_date(base_date, days)?;

        debug!(phase = phase.as_str(), velocity, days, %date, "Quick forecast");

        Ok(Forecast {
            date,
            days,
            phase,
            velocity,
            confidence: phase.confidence(),
        })
    }

    /// Fold one day of progress into `state` and forecast from `today`.
    ///
    /// Returns the updated state; `state` itself is left untouched.
    pub fn process_daily_update(
        &self,
        state: &ForecastState,
        today: Date,
        credits: f64,
        total_to_finish: f64,
    ) -> Result<(ForecastState, Forecast)> {
        let mut next = state.clone();
        let days_active = days_active(next.start_date, today);

        next.completed_total += credits;
        next.velocity_buffer.push(credits);
        if next.velocity_buffer.len() > self.config.median_window {
            next.velocity_buffer.remove(0);
        }

        let phase = self.phase_for(days_active);
        let velocity = match phase {
            ForecastPhase::ColdStart => {
                let v = self.cold_start_velocity(next.completed_total, days_active);
                next.last_ewma_velocity = Some(v);
                v
            }
            ForecastPhase::Maturity => {
                let clean = median(&next.velocity_buffer);
                let weekday = weekday_index(today);
                let seasonality =
                    seasonal_weight(&next.seasonal_indices, weekday).max(self.config.epsilon);
                let adjusted = clean / seasonality;

                let previous = next
                    .last_ewma_velocity
                    .filter(|v| *v != 0.0)
                    .unwrap_or(adjusted);
                let trend = self.ewma(adjusted, previous);
                next.last_ewma_velocity = Some(trend);

                self.learn_seasonality(&mut next, clean, trend, weekday);
                trend
            }
        };

        let remaining = total_to_finish - next.completed_total;
        let (date, days) = self.project(velocity, remaining, &next.seasonal_indices, today)?;

        info!(
            days_active,
            phase = phase.as_str(),
            velocity,
            days,
            %date,
            "Processed daily update"
        );

        let forecast = Forecast {
            date,
            days,
            phase,
            velocity,
            confidence: phase.confidence(),
        };
        Ok((next, forecast))
    }

    /// Walk forward one day at a time until `remaining` credits are burned down.
    ///
    /// Each day contributes `velocity * indices[weekday]`, with an unset
    /// (zero) index counting as 1.0. Stops at the projection horizon.
    pub fn project(
        &self,
        velocity: f64,
        remaining: f64,
        indices: &[f64; DAYS_PER_WEEK],
        from: Date,
    ) -> Result<(Date, u32)> {
        if velocity <= self.config.epsilon {
            let days = self.config.stalled_fallback_days;
            warn!(velocity, days, "Velocity stalled, using fallback horizon");
            return Ok((completion_date(from, days)?, days));
        }

        let mut remaining = remaining;
        let mut current = from;
        let mut days = 0;

        while remaining > 0.0 && days < self.config.projection_horizon_days {
            current = current.succ_opt().ok_or(EstimateError::DateOutOfRange {
                base: from,
                days: u64::from(days) + 1,
            })?;
            days += 1;
            remaining -= velocity * seasonal_weight(indices, weekday_index(current));
        }

        Ok((current, days))
    }

    fn learn_seasonality(&self, state: &mut ForecastState, actual: f64, trend: f64, weekday: usize) {
        if trend <= self.config.epsilon {
            return;
        }

        let beta = self.config.seasonality_learning_rate;
        let ratio = actual / trend;
        let old = seasonal_weight(&state.seasonal_indices, weekday);
        state.seasonal_indices[weekday] = (1.0 - beta) * old + beta * ratio;

        // Renormalize to a mean of 1.0
        let sum: f64 = state.seasonal_indices.iter().sum();
        if sum > 0.0 {
            for index in state.seasonal_indices.iter_mut() {
                *index = *index / sum * DAYS_PER_WEEK as f64;
            }
        }
    }
}

/// Upper median: the middle element of the sorted values.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted[sorted.len() / 2]
}

/// Seasonal factor for `weekday`; a zero index means unlearned and counts as 1.0.
fn seasonal_weight(indices: &[f64; DAYS_PER_WEEK], weekday: usize) -> f64 {
    let weight = indices[weekday];
    if weight == 0.0 {
        1.0
    } else {
        weight
    }
}

fn weekday_index(date: Date) -> usize {
    date.weekday().num_days_from_sunday() as usize
}
