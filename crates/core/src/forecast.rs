//! Forecast output.

use serde::{Deserialize, Serialize};
use crate::Date;

/// Which velocity model produced a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastPhase {
    /// Few active days; velocity is smoothed toward the prior
    ColdStart,
    /// Enough history; velocity follows median-filtered EWMA
    Maturity,
}

impl ForecastPhase {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastPhase::ColdStart => "COLD_START",
            ForecastPhase::Maturity => "MATURITY",
        }
    }

    /// Confidence attached to forecasts from this phase.
    pub fn confidence(&self) -> f64 {
        match self {
            ForecastPhase::ColdStart => 0.4,
            ForecastPhase::Maturity => 0.85,
        }
    }
}

/// A projected completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Projected completion date
    pub date: Date,

    /// Days from the base date to completion
    pub days: u32,

    /// Phase that produced the velocity
    pub phase: ForecastPhase,

    /// Velocity used for the projection
    pub velocity: f64,

    /// Confidence in the projection (0-1)
    pub confidence: f64,
}
