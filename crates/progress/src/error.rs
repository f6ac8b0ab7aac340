//! Estimation errors.

use pace_core::Date;

/// Result type for estimation operations.
pub type Result<T> = std::result::Result<T, EstimateError>;

/// Errors that can occur while estimating a completion date.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    /// Velocity is zero, negative or not a number
    #[error("velocity must be positive and finite, got {0}")]
    NonPositiveVelocity(f64),

    /// Day count does not fit the calendar
    #[error("day count {0} is out of range")]
    DayCountOverflow(f64),

    /// Calendar arithmetic left the representable range
    #[error("{base} plus {days} days is not a representable date")]
    DateOutOfRange {
        /// Anchor date
        base: Date,
        /// Days added
        days: u64,
    },

    /// Back-solving needs a target strictly after the base date
    #[error("target date {target} is not after base date {base}")]
    TargetNotAfterBase {
        /// Anchor date
        base: Date,
        /// Date being explained
        target: Date,
    },

    /// Sweep parameter does not vary the sweep's axis
    #[error("parameter does not match the axis of sweep '{0}'")]
    AxisMismatch(String),

    /// Credit averages need at least one finished lesson
    #[error("no completed lessons to average credits over")]
    NoCompletedLessons,
}
