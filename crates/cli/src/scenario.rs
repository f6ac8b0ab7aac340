//! The student record under investigation.

use anyhow::{anyhow, Result};
use pace_core::{Date, ForecastConfig, LessonRecord, StudentProgress};
use pace_progress::{
    days_active, BackSolve, CompletionEstimator, Sweep, SweepAxis,
};

/// Days active pinned by the prior sweep and the back-solve.
pub const PINNED_DAYS_ACTIVE: u32 = 6;

/// Fixed inputs of the diagnostic.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Forecast calibration
    pub config: ForecastConfig,

    /// Credits earned, as recorded by the dashboard
    pub completed_credits: f64,

    /// Credits left, as recorded by the dashboard
    pub remaining_credits: f64,

    /// Date the dashboard forecast was taken
    pub base_date: Date,

    /// Date the dashboard shows
    pub target_date: Date,

    /// Day of the last lesson, tried as an alternate base
    pub alt_base_date: Date,

    /// Day of the first lesson
    pub first_activity: Date,

    /// Finished lessons
    pub lessons: Vec<LessonRecord>,

    /// Lessons still to watch
    pub lessons_remaining: u32,

    /// Candidate priors for the prior sweep
    pub prior_candidates: Vec<f64>,
}

fn ymd(year: i32, month: u32, day: u32) -> Result<Date> {
    Date::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("invalid date {year}-{month:02}-{day:02}"))
}

impl Scenario {
    /// The record where the dashboard showed 01/04.
    pub fn reference() -> Result<Self> {
        Ok(Self {
            config: ForecastConfig::default(),
            completed_credits: 2.26,
            remaining_credits: 205.65,
            base_date: ymd(2026, 1, 19)?,
            target_date: ymd(2026, 4, 1)?,
            alt_base_date: ymd(2026, 1, 14)?,
            first_activity: ymd(2026, 1, 14)?,
            lessons: vec![
                LessonRecord::new("Introduction", 169),
                LessonRecord::new("Platform tour", 167),
                LessonRecord::new("Why Python?", 476),
                LessonRecord::new("Introduction to Google Colab", 347),
                LessonRecord::new("Opening Google Colab", 862),
            ],
            lessons_remaining: 457,
            prior_candidates: vec![3.0, 3.5, 4.0, 4.5, 5.0, 5.5, 6.0],
        })
    }

    /// Estimator built from the calibration.
    pub fn estimator(&self) -> CompletionEstimator {
        CompletionEstimator::from_config(&self.config)
    }

    /// Days active between the first lesson and the base date.
    pub fn days_active(&self) -> u32 {
        days_active(self.first_activity, self.base_date)
    }

    /// Progress snapshot as the dashboard saw it.
    pub fn progress(&self) -> StudentProgress {
        StudentProgress::new(self.completed_credits, self.remaining_credits, self.days_active())
    }

    fn sweep(&self, title: &str, base_date: Date, axis: SweepAxis) -> Sweep {
        Sweep {
            title: title.to_string(),
            estimator: self.estimator(),
            completed_credits: self.completed_credits,
            remaining_credits: self.remaining_credits,
            base_date,
            target_date: self.target_date,
            axis,
        }
    }

    /// Vary days active from the dashboard's base date.
    pub fn days_active_sweep(&self) -> Sweep {
        self.sweep(
            "SCENARIO 1: varying days_active",
            self.base_date,
            SweepAxis::DaysActive(1..=14),
        )
    }

    /// Vary the prior with days active pinned.
    pub fn prior_sweep(&self) -> Sweep {
        self.sweep(
            &format!("SCENARIO 2: varying prior (days_active={PINNED_DAYS_ACTIVE})"),
            self.base_date,
            SweepAxis::Prior {
                days_active: PINNED_DAYS_ACTIVE,
                priors: self.prior_candidates.clone(),
            },
        )
    }

    /// Vary days active from the last lesson's date.
    pub fn alt_base_sweep(&self) -> Sweep {
        self.sweep(
            "SCENARIO 3: base date = last lesson day",
            self.alt_base_date,
            SweepAxis::DaysActive(1..=9),
        )
    }

    /// Completed credits that would land exactly on the target.
    pub fn back_solve(&self) -> pace_progress::Result<BackSolve> {
        self.estimator().back_solve(
            self.completed_credits,
            self.remaining_credits,
            PINNED_DAYS_ACTIVE,
            self.base_date,
            self.target_date,
        )
    }
}
