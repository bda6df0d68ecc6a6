use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

pub const MINUTES_PER_DAY: u64 = 1440;

/// Wall-clock time of day in minutes since midnight. Arithmetic wraps at
/// 24:00, so schedules that cross midnight stay representable.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Time(pub u64);

impl Time {
    pub fn from_hm(hours: u64, minutes: u64) -> Time {
        Time((hours * 60 + minutes) % MINUTES_PER_DAY)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = (self.0 % MINUTES_PER_DAY) / 60;
        let mins = self.0 % 60;
        write!(f, "{:02}:{:02}", hours, mins)
    }
}

impl Add<u64> for Time {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Time((self.0 + rhs) % MINUTES_PER_DAY)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseTimeError(String);

impl fmt::Display for ParseTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid time '{}', expected HH:MM", self.0)
    }
}

impl std::error::Error for ParseTimeError {}

impl FromStr for Time {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseTimeError(s.to_string());
        let (hours, mins) = s.split_once(':').ok_or_else(bad)?;
        let hours = hours.parse::<u64>().map_err(|_| bad())?;
        let mins = mins.parse::<u64>().map_err(|_| bad())?;
        if hours > 23 || mins > 59 {
            return Err(bad());
        }
        Ok(Time::from_hm(hours, mins))
    }
}

impl TryFrom<String> for Time {
    type Error = ParseTimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Time> for String {
    fn from(t: Time) -> String {
        t.to_string()
    }
}
