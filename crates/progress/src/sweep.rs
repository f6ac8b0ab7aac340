//! Parameter sweeps over the completion estimate.
//!
//! A [`Sweep`] holds every fixed input and one varying axis. Rows are
//! produced lazily by [`Sweep::rows`] and the sweep can be iterated any
//! number of times.

use std::ops::RangeInclusive;

use pace_core::Date;

use crate::error::{EstimateError, Result};
use crate::estimator::{target_delta, CompletionEstimator, Estimate};

/// The value varied by a sweep.
#[derive(Debug, Clone)]
pub enum SweepAxis {
    /// Vary days active over an ascending range
    DaysActive(RangeInclusive<u32>),
    /// Vary the prior velocity with days active held fixed
    Prior {
        /// Fixed days active
        days_active: u32,
        /// Candidate priors, ascending
        priors: Vec<f64>,
    },
}

/// Parameter value of one sweep row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepParameter {
    /// Days active used for the row
    DaysActive(u32),
    /// Prior velocity used for the row
    Prior(f64),
}

/// One evaluated sweep point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRow {
    /// Varied parameter
    pub parameter: SweepParameter,

    /// Estimate at this parameter
    pub estimate: Estimate,

    /// Whether the day count equals the sweep's target delta
    pub is_match: bool,
}

/// A finite sweep of completion estimates.
#[derive(Debug, Clone)]
pub struct Sweep {
    /// Section title
    pub title: String,

    /// Estimator supplying inertia and the default prior
    pub estimator: CompletionEstimator,

    /// Credits already earned
    pub completed_credits: f64,

    /// Credits left to earn
    pub remaining_credits: f64,

    /// Anchor of every projection
    pub base_date: Date,

    /// Date the rows are compared against
    pub target_date: Date,

    /// Varied parameter
    pub axis: SweepAxis,
}

impl Sweep {
    /// Day count every row is matched against.
    pub fn target_delta(&self) -> i64 {
        target_delta(self.base_date, self.target_date)
    }

    fn parameters(&self) -> Box<dyn Iterator<Item = SweepParameter> + '_> {
        match &self.axis {
            SweepAxis::DaysActive(range) => {
                Box::new(range.clone().map(SweepParameter::DaysActive))
            }
            SweepAxis::Prior { priors, .. } => {
                Box::new(priors.iter().copied().map(SweepParameter::Prior))
            }
        }
    }

    /// Evaluate one parameter value.
    ///
    /// The parameter must vary the same quantity as the sweep's axis.
    pub fn evaluate(&self, parameter: SweepParameter) -> Result<SweepRow> {
        let (estimator, days_active) = match (parameter, &self.axis) {
            (SweepParameter::DaysActive(days), SweepAxis::DaysActive(_)) => (self.estimator, days),
            (SweepParameter::Prior(prior), SweepAxis::Prior { days_active, .. }) => {
                (self.estimator.with_prior(prior), *days_active)
            }
            _ => return Err(EstimateError::AxisMismatch(self.title.clone())),
        };

        let estimate = estimator.estimate(
            self.completed_credits,
            self.remaining_credits,
            days_active,
            self.base_date,
        )?;

        Ok(SweepRow {
            parameter,
            estimate,
            is_match: i64::from(estimate.days_remaining) == self.target_delta(),
        })
    }

    /// Lazily evaluate every row in axis order.
    pub fn rows(&self) -> impl Iterator<Item = Result<SweepRow>> + '_ {
        self.parameters().map(move |parameter| self.evaluate(parameter))
    }

    /// Rows whose day count hits the target delta.
    pub fn matches(&self) -> Result<Vec<SweepRow>> {
        self.rows()
            .filter(|row| row.as_ref().map_or(true, |row| row.is_match))
            .collect()
    }
}
