use crate::time::{MINUTES_PER_DAY, Time};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::sync::Arc;
use tabled::Tabled;

pub type IntervalId = Arc<str>;

/// Closed set of FMCSA duty statuses. Anything else coming off the wire
/// lands in `Unknown`, which the evaluator skips instead of failing on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum DutyStatus {
    OffDuty,
    SleeperBerth,
    Driving,
    OnDuty,
    Unknown,
}

impl DutyStatus {
    pub fn parse(s: &str) -> DutyStatus {
        match s {
            "off-duty" => DutyStatus::OffDuty,
            "sleeper-berth" => DutyStatus::SleeperBerth,
            "driving" => DutyStatus::Driving,
            "on-duty" => DutyStatus::OnDuty,
            _ => DutyStatus::Unknown,
        }
    }

    /// Off-duty and sleeper-berth both count toward rest.
    pub fn is_rest(&self) -> bool {
        matches!(self, DutyStatus::OffDuty | DutyStatus::SleeperBerth)
    }
}

impl From<String> for DutyStatus {
    fn from(s: String) -> Self {
        DutyStatus::parse(&s)
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DutyStatus::OffDuty => "off-duty",
            DutyStatus::SleeperBerth => "sleeper-berth",
            DutyStatus::Driving => "driving",
            DutyStatus::OnDuty => "on-duty",
            DutyStatus::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// One continuous span of a single duty status. `end` is exclusive; an
/// `end` earlier than `start` is read as crossing midnight. Durations are
/// always derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
pub struct DutyInterval {
    pub id: IntervalId,
    pub status: DutyStatus,
    pub start: Time,
    pub end: Time,
    #[serde(default)]
    #[tabled(display("display_remarks"))]
    pub remarks: Option<String>,
}

fn display_remarks(remarks: &Option<String>) -> String {
    remarks.clone().unwrap_or_default()
}

impl DutyInterval {
    /// Duration in hours. An `end` at or before `start` on the clock face
    /// wraps past midnight, so the result is non-negative and under 24 h.
    pub fn duration_hours(&self) -> f64 {
        let start = self.start.0 % MINUTES_PER_DAY;
        let end = self.end.0 % MINUTES_PER_DAY;
        let minutes = (end + MINUTES_PER_DAY - start) % MINUTES_PER_DAY;
        minutes as f64 / 60.0
    }

    /// Ingestion-boundary check: zero-length spans are rejected. Anything
    /// else is a valid duration thanks to the midnight wrap.
    pub fn validate(&self) -> Result<(), InvalidInterval> {
        if self.end == self.start {
            return Err(InvalidInterval {
                id: self.id.clone(),
                at: self.start,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvalidInterval {
    pub id: IntervalId,
    pub at: Time,
}

impl fmt::Display for InvalidInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interval {}: zero-length span at {}", self.id, self.at)
    }
}

impl std::error::Error for InvalidInterval {}

/// A driver's working day as loaded from a JSON log file: the interval
/// list, hours already burned in the rolling 8-day cycle, and the limits
/// to check against (defaulted when the file omits them).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyDay {
    #[serde(default)]
    pub cycle_hours: f64,
    #[serde(default)]
    pub limits: crate::limits::HosLimits,
    pub intervals: Vec<DutyInterval>,
}

impl DutyDay {
    pub fn load_from_file(path: &str) -> io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let day: DutyDay = serde_json::from_str(&data)?;
        Ok(day)
    }
}
