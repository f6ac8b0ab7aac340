//! Completion Forecasting
//!
//! Blended-velocity completion estimates, parameter sweeps over them,
//! effort credit accounting and the phased forecast engine.

#![warn(missing_docs)]

pub mod error;
pub mod estimator;
pub mod sweep;
pub mod credits;
pub mod forecast;

pub use error::{EstimateError, Result};
pub use estimator::{
    completion_date, days_remaining, target_delta, velocity, BackSolve, CompletionEstimator,
    Estimate,
};
pub use sweep::{Sweep, SweepAxis, SweepParameter, SweepRow};
pub use credits::{completed_credits, days_active, estimate_remaining_credits, lesson_credits};
pub use forecast::ForecastEngine;
