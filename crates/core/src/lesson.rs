//! Lesson log and progress snapshot.

use serde::{Deserialize, Serialize};

/// A finished lesson as recorded in the activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRecord {
    /// Lesson title
    pub title: String,

    /// Watched duration in seconds
    pub duration_seconds: u32,
}

impl LessonRecord {
    /// Create a lesson record.
    pub fn new(title: impl Into<String>, duration_seconds: u32) -> Self {
        Self {
            title: title.into(),
            duration_seconds,
        }
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> f64 {
        f64::from(self.duration_seconds) / 60.0
    }
}

/// A student's progress at the moment a forecast is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProgress {
    /// Credits already earned
    pub completed_credits: f64,

    /// Credits left to earn
    pub remaining_credits: f64,

    /// Days since the first activity, inclusive
    pub days_active: u32,

    /// Recent credits per day, oldest first
    pub recent_daily_credits: Vec<f64>,

    /// EWMA velocity carried over from the previous forecast
    pub previous_ewma_velocity: Option<f64>,
}

impl StudentProgress {
    /// Create a snapshot with no daily history.
    pub fn new(completed_credits: f64, remaining_credits: f64, days_active: u32) -> Self {
        Self {
            completed_credits,
            remaining_credits,
            days_active,
            recent_daily_credits: Vec::new(),
            previous_ewma_velocity: None,
        }
    }
}
