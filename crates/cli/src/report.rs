//! Console report.

use std::io::Write;

use anyhow::Result;
use pace_core::Date;
use pace_progress::{
    completed_credits, estimate_remaining_credits, BackSolve, ForecastEngine, Sweep,
    SweepParameter, SweepRow,
};

use crate::scenario::{Scenario, PINNED_DAYS_ACTIVE};

const RULE_WIDTH: usize = 60;

fn day_month(date: Date) -> String {
    date.format("%d/%m").to_string()
}

fn banner(out: &mut impl Write, title: &str) -> Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    Ok(())
}

fn section(out: &mut impl Write, title: &str) -> Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    Ok(())
}

/// Render the full diagnostic.
pub fn render(out: &mut impl Write, scenario: &Scenario) -> Result<()> {
    banner(
        out,
        &format!(
            "DIAGNOSTIC: why does the dashboard show {}?",
            day_month(scenario.target_date)
        ),
    )?;
    writeln!(out)?;

    render_inputs(out, scenario)?;
    render_derivation(out, scenario)?;

    let primary = scenario.days_active_sweep();
    section(out, &primary.title)?;
    writeln!(out, "Base date: {}", primary.base_date)?;
    writeln!(out, "Dashboard target date: {}", primary.target_date)?;
    writeln!(out, "Delta: {} days", primary.target_delta())?;
    writeln!(out)?;
    render_rows(out, &primary)?;
    writeln!(out)?;

    let priors = scenario.prior_sweep();
    section(out, &priors.title)?;
    render_rows(out, &priors)?;
    writeln!(out)?;

    let alternate = scenario.alt_base_sweep();
    section(out, &alternate.title)?;
    writeln!(out, "New base date: {}", alternate.base_date)?;
    writeln!(
        out,
        "Delta to {}: {} days",
        day_month(alternate.target_date),
        alternate.target_delta()
    )?;
    writeln!(out)?;
    render_rows(out, &alternate)?;
    writeln!(out)?;

    render_conclusion(out, scenario, &scenario.back_solve()?)
}

fn render_inputs(out: &mut impl Write, scenario: &Scenario) -> Result<()> {
    writeln!(out, "INPUT DATA:")?;
    writeln!(out, "  Completed credits: {}", scenario.completed_credits)?;
    writeln!(out, "  Remaining credits: {}", scenario.remaining_credits)?;
    writeln!(out, "  C (inertia): {}", scenario.config.inertia)?;
    writeln!(out, "  Prior: {:.1} credits/day", scenario.config.velocity_prior)?;
    writeln!(out)?;
    Ok(())
}

fn render_derivation(out: &mut impl Write, scenario: &Scenario) -> Result<()> {
    let config = &scenario.config;
    let minutes: f64 = scenario.lessons.iter().map(|l| l.duration_minutes()).sum();
    let from_log = completed_credits(config, &scenario.lessons);
    let lessons_done = u32::try_from(scenario.lessons.len())?;
    let remaining = estimate_remaining_credits(from_log, lessons_done, scenario.lessons_remaining)?;

    section(out, "DERIVATION from the lesson log")?;
    writeln!(
        out,
        "  Lessons: {} ({:.2} min) -> {:.2} credits",
        lessons_done, minutes, from_log
    )?;
    writeln!(
        out,
        "  Remaining: {:.2} credits/lesson x {} lessons = {:.2} credits",
        from_log / f64::from(lessons_done),
        scenario.lessons_remaining,
        remaining
    )?;
    writeln!(
        out,
        "  Days active: {} .. {} = {}",
        scenario.first_activity,
        scenario.base_date,
        scenario.days_active()
    )?;

    let engine = ForecastEngine::new(config.clone());
    let forecast = engine.quick_forecast(&scenario.progress(), scenario.base_date)?;
    writeln!(
        out,
        "  Forecast: vel={:.2}, days={:3}, date={} ({}, confidence {:.2})",
        forecast.velocity,
        forecast.days,
        day_month(forecast.date),
        forecast.phase.as_str(),
        forecast.confidence
    )?;
    writeln!(out)?;
    Ok(())
}

fn format_row(row: &SweepRow) -> String {
    let parameter = match row.parameter {
        SweepParameter::DaysActive(days) => format!("days_active={days:2}"),
        SweepParameter::Prior(prior) => format!("prior={prior:.1}"),
    };
    let marker = if row.is_match { " * MATCH" } else { "" };

    format!(
        "{}: vel={:.2}, days={:3}, date={}{}",
        parameter,
        row.estimate.velocity,
        row.estimate.days_remaining,
        day_month(row.estimate.completion_date),
        marker
    )
}

fn render_rows(out: &mut impl Write, sweep: &Sweep) -> Result<()> {
    for row in sweep.rows() {
        writeln!(out, "{}", format_row(&row?))?;
    }
    Ok(())
}

fn render_conclusion(out: &mut impl Write, scenario: &Scenario, solve: &BackSolve) -> Result<()> {
    banner(out, "CONCLUSION")?;
    writeln!(
        out,
        "To reach {} from base date {} (days_active={}):",
        day_month(scenario.target_date),
        day_month(scenario.base_date),
        PINNED_DAYS_ACTIVE
    )?;
    writeln!(out, "  Days needed: {}", solve.target_delta)?;
    writeln!(out, "  Velocity needed: {:.3} credits/day", solve.velocity_required)?;
    writeln!(out, "  Completed credits needed: {:.3}", solve.required_credits)?;
    writeln!(out, "  Actual completed credits: {}", solve.actual_credits)?;
    writeln!(out)?;

    let difference = solve.difference();
    let relation = if difference >= 0.0 { "more" } else { "fewer" };
    writeln!(
        out,
        "Difference: {:.2} credits {} than the target date implies",
        difference.abs(),
        relation
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered() -> String {
        let scenario = Scenario::reference().unwrap();
        let mut buffer = Vec::new();
        render(&mut buffer, &scenario).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_report_marks_matching_rows() {
        let report = rendered();
        assert!(report.contains("days_active= 6: vel=2.87, days= 72, date=01/04 * MATCH"));
        assert!(report.contains("prior=5.0: vel=2.87, days= 72, date=01/04 * MATCH"));
        assert_eq!(report.matches("MATCH").count(), 2);
    }

    #[test]
    fn test_report_row_counts() {
        let report = rendered();
        assert_eq!(report.lines().filter(|l| l.starts_with("days_active=")).count(), 14 + 9);
        assert_eq!(report.lines().filter(|l| l.starts_with("prior=")).count(), 7);
    }

    #[test]
    fn test_report_alternate_base_delta() {
        let report = rendered();
        assert!(report.contains("New base date: 2026-01-14"));
        assert!(report.contains("Delta to 01/04: 77 days"));
    }

    #[test]
    fn test_report_derivation() {
        let report = rendered();
        assert!(report.contains("Lessons: 5 (33.68 min) -> 2.25 credits"));
        assert!(report.contains("Days active: 2026-01-14 .. 2026-01-19 = 6"));
        assert!(report.contains("date=01/04 (COLD_START, confidence 0.40)"));
    }

    #[test]
    fn test_report_conclusion() {
        let report = rendered();
        assert!(report.contains("  Days needed: 72"));
        assert!(report.contains("  Velocity needed: 2.856 credits/day"));
        assert!(report.contains("  Completed credits needed: 2.131"));
        assert!(report.contains("Difference: 0.13 credits more than the target date implies"));
    }

    #[test]
    fn test_format_row_without_match() {
        let scenario = Scenario::reference().unwrap();
        let row = scenario
            .days_active_sweep()
            .evaluate(SweepParameter::DaysActive(1))
            .unwrap();
        let line = format_row(&row);
        assert!(line.starts_with("days_active= 1: vel="));
        assert!(!line.contains("MATCH"));
    }
}
