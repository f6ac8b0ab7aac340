//! Effort credits.
//!
//! Lessons are weighted by watched duration: `credit_divisor` minutes
//! make one credit, with a small floor so very short lessons still count.

use pace_core::{Date, ForecastConfig, LessonRecord};

use crate::error::{EstimateError, Result};
use crate::estimator::target_delta;

/// Credits earned by a single lesson of `duration_minutes`.
pub fn lesson_credits(config: &ForecastConfig, duration_minutes: f64) -> f64 {
    (duration_minutes / config.credit_divisor).max(config.min_lesson_credit)
}

/// Total credits over a lesson log.
pub fn completed_credits(config: &ForecastConfig, lessons: &[LessonRecord]) -> f64 {
    lessons
        .iter()
        .map(|lesson| lesson_credits(config, lesson.duration_minutes()))
        .sum()
}

/// Extrapolate remaining credits from the average credit per finished lesson.
pub fn estimate_remaining_credits(
    completed_credits: f64,
    lessons_completed: u32,
    lessons_remaining: u32,
) -> Result<f64> {
    if lessons_completed == 0 {
        return Err(EstimateError::NoCompletedLessons);
    }

    let average = completed_credits / f64::from(lessons_completed);
    Ok(average * f64::from(lessons_remaining))
}

/// Active days from the first activity through `today`, counting both ends.
///
/// Never less than 1, even when `today` precedes the first activity.
pub fn days_active(first_activity: Date, today: Date) -> u32 {
    let days = target_delta(first_activity, today) + 1;
    u32::try_from(days.max(1)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lesson_credits_divisor() {
        let config = ForecastConfig::default();
        assert_eq!(lesson_credits(&config, 15.0), 1.0);
        assert_eq!(lesson_credits(&config, 180.0), 12.0);
    }

    #[test]
    fn test_lesson_credits_floor() {
        let config = ForecastConfig::default();
        assert_eq!(lesson_credits(&config, 0.0), 0.1);
        assert_eq!(lesson_credits(&config, 1.0), 0.1);
    }

    #[test]
    fn test_completed_credits_from_log() {
        let config = ForecastConfig::default();
        let lessons = vec![
            LessonRecord::new("Intro", 169),
            LessonRecord::new("Platform tour", 167),
            LessonRecord::new("Why Python", 476),
            LessonRecord::new("Colab intro", 347),
            LessonRecord::new("Opening Colab", 862),
        ];

        // 2021 seconds of content
        let total = completed_credits(&config, &lessons);
        assert!((total - 2021.0 / 60.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_completed_credits_empty_log() {
        assert_eq!(completed_credits(&ForecastConfig::default(), &[]), 0.0);
    }

    #[test]
    fn test_estimate_remaining_credits() {
        let remaining = estimate_remaining_credits(2.26, 5, 457).unwrap();
        assert!((remaining - 0.452 * 457.0).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_remaining_requires_lessons() {
        assert_eq!(
            estimate_remaining_credits(0.0, 0, 10),
            Err(EstimateError::NoCompletedLessons)
        );
    }

    #[test]
    fn test_days_active_inclusive() {
        assert_eq!(days_active(date(2026, 1, 14), date(2026, 1, 19)), 6);
        assert_eq!(days_active(date(2026, 1, 14), date(2026, 1, 14)), 1);
    }

    #[test]
    fn test_days_active_never_below_one() {
        assert_eq!(days_active(date(2026, 1, 19), date(2026, 1, 14)), 1);
    }
}
