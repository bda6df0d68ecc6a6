use crate::duty::{DutyInterval, DutyStatus};
use crate::limits::HosLimits;
use serde::Serialize;

/// A 30-minute break is due within every 8 hours of driving/on-duty time.
pub const REST_BREAK_WINDOW_HOURS: f64 = 8.0;

// Warning bands are fixed hour margins below each ceiling, not percentages.
const DRIVING_WARNING_MARGIN: f64 = 1.0;
const ON_DUTY_WARNING_MARGIN: f64 = 2.0;
const CYCLE_WARNING_MARGIN: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LimitKind {
    Driving,
    OnDuty,
    Cycle,
    RestBreak,
    // Reserved for the 10-hour daily reset; no check emits it yet.
    #[allow(dead_code)]
    OffDuty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Warning,
    Violation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HosViolation {
    pub kind: LimitKind,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<f64>,
}

/// Aggregate output of one evaluation pass. Built fresh per call; equal
/// inputs always produce an equal status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HosStatus {
    pub driving_hours_used: f64,
    pub on_duty_hours_used: f64,
    pub cycle_hours_used: f64,
    pub hours_until_break: f64,
    pub hours_until_off_duty: f64,
    pub violations: Vec<HosViolation>,
    pub can_continue_driving: bool,
}

/// Per-day hour accumulator. One `observe` per interval, folded left to
/// right over the caller-ordered list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayTotals {
    /// Hours spent driving.
    pub driving: f64,
    /// Hours spent on duty, not driving.
    pub on_duty: f64,
    /// Running driving+on-duty clock, used to measure time since the last
    /// qualifying break.
    pub on_duty_clock: f64,
    /// Clock reading at the latest rest break of at least 30 minutes.
    /// Overwritten by each later qualifying break.
    pub last_rest_break: f64,
    /// Clock reading at the latest off-duty span long enough for a daily
    /// reset. Telemetry only; no check keys off it.
    pub last_off_duty: f64,
    /// Intervals skipped because their status was not recognized.
    pub unknown: u32,
}

impl DayTotals {
    pub fn observe(mut self, interval: &DutyInterval, limits: &HosLimits) -> DayTotals {
        let duration = interval.duration_hours();
        match interval.status {
            DutyStatus::Driving => {
                self.driving += duration;
                self.on_duty_clock += duration;
            }
            DutyStatus::OnDuty => {
                self.on_duty += duration;
                self.on_duty_clock += duration;
            }
            DutyStatus::OffDuty | DutyStatus::SleeperBerth => {
                if duration >= limits.required_rest_break {
                    self.last_rest_break = self.on_duty_clock;
                }
                if duration >= limits.required_off_duty {
                    self.last_off_duty = self.on_duty_clock;
                }
            }
            DutyStatus::Unknown => self.unknown += 1,
        }
        self
    }
}

/// Folds the day's intervals into hour totals. Input order is trusted;
/// intervals are not resorted or checked for overlap.
pub fn day_totals(intervals: &[DutyInterval], limits: &HosLimits) -> DayTotals {
    intervals
        .iter()
        .fold(DayTotals::default(), |acc, interval| acc.observe(interval, limits))
}

fn check_ceiling(
    kind: LimitKind,
    label: &str,
    used: f64,
    ceiling: f64,
    warning_margin: f64,
) -> Option<HosViolation> {
    if used > ceiling {
        Some(HosViolation {
            kind,
            severity: Severity::Violation,
            message: format!(
                "Exceeded {}-hour {} limit by {:.1} hours",
                ceiling,
                label,
                used - ceiling
            ),
            time_remaining: None,
        })
    } else if used > ceiling - warning_margin {
        Some(HosViolation {
            kind,
            severity: Severity::Warning,
            message: format!("Approaching {}-hour {} limit", ceiling, label),
            time_remaining: Some(ceiling - used),
        })
    } else {
        None
    }
}

/// Checks one duty day against the four limits. `current_cycle_hours` is
/// the tally already on the books for the rolling 8-day cycle; it is taken
/// at face value, range validation is the caller's problem.
pub fn evaluate(
    intervals: &[DutyInterval],
    current_cycle_hours: f64,
    limits: &HosLimits,
) -> HosStatus {
    let totals = day_totals(intervals, limits);
    let total_on_duty = totals.driving + totals.on_duty;
    let cycle_hours = current_cycle_hours + total_on_duty;

    let mut violations = Vec::new();
    violations.extend(check_ceiling(
        LimitKind::Driving,
        "driving",
        totals.driving,
        limits.max_driving_hours,
        DRIVING_WARNING_MARGIN,
    ));
    violations.extend(check_ceiling(
        LimitKind::OnDuty,
        "on-duty",
        total_on_duty,
        limits.max_on_duty_hours,
        ON_DUTY_WARNING_MARGIN,
    ));
    violations.extend(check_ceiling(
        LimitKind::Cycle,
        "cycle",
        cycle_hours,
        limits.max_cycle_hours,
        CYCLE_WARNING_MARGIN,
    ));

    let since_break = totals.on_duty_clock - totals.last_rest_break;
    let hours_until_break = (REST_BREAK_WINDOW_HOURS - since_break).max(0.0);
    if since_break >= REST_BREAK_WINDOW_HOURS {
        violations.push(HosViolation {
            kind: LimitKind::RestBreak,
            severity: Severity::Violation,
            message: "Required 30-minute break after 8 hours of driving".to_string(),
            time_remaining: None,
        });
    }

    let hours_until_off_duty = (limits.max_on_duty_hours - total_on_duty).max(0.0);
    let can_continue_driving = violations
        .iter()
        .all(|v| v.severity != Severity::Violation);

    HosStatus {
        driving_hours_used: totals.driving,
        on_duty_hours_used: totals.on_duty,
        cycle_hours_used: cycle_hours,
        hours_until_break,
        hours_until_off_duty,
        violations,
        can_continue_driving,
    }
}

#[cfg(test)]
mod tests;
