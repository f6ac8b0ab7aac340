//! Persisted forecast state.

use serde::{Deserialize, Serialize};
use crate::Date;

/// Number of weekday seasonal indices.
pub const DAYS_PER_WEEK: usize = 7;

/// Running state carried between daily forecast updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastState {
    /// Date of the first activity
    pub start_date: Date,

    /// Credits earned so far
    pub completed_total: f64,

    /// Last EWMA velocity, if any
    pub last_ewma_velocity: Option<f64>,

    /// Most recent daily credits, bounded by the median window
    pub velocity_buffer: Vec<f64>,

    /// Seasonal factor per weekday, Sunday first; sums to 7
    pub seasonal_indices: [f64; DAYS_PER_WEEK],
}

impl ForecastState {
    /// Create the initial state for a student starting on `start_date`.
    pub fn new(start_date: Date) -> Self {
        Self {
            start_date,
            completed_total: 0.0,
            last_ewma_velocity: None,
            velocity_buffer: Vec::new(),
            seasonal_indices: [1.0; DAYS_PER_WEEK],
        }
    }
}
