//! Pace core data models.
//!
//! This crate defines the plain data structures shared by the estimator
//! and the diagnostic report: forecast calibration, lesson records,
//! progress snapshots and the persisted forecast state.

#![warn(missing_docs)]

// Calibration
mod config;

// Progress inputs and outputs
mod lesson;
mod forecast;
mod state;

// Re-exports
pub use config::ForecastConfig;
pub use lesson::{LessonRecord, StudentProgress};
pub use forecast::{Forecast, ForecastPhase};
pub use state::{ForecastState, DAYS_PER_WEEK};

/// Calendar date type used throughout the workspace.
pub type Date = chrono::NaiveDate;
