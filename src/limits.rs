use serde::{Deserialize, Serialize};

/// The four regulatory ceilings of the single-period HOS check, plus the
/// qualifying durations for rest breaks and daily off-duty resets.
/// Property-carrying interstate defaults; override per scenario file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HosLimits {
    pub max_driving_hours: f64,
    pub max_on_duty_hours: f64,
    pub max_cycle_hours: f64,
    pub required_rest_break: f64,
    pub required_off_duty: f64,
}

impl Default for HosLimits {
    fn default() -> Self {
        HosLimits {
            max_driving_hours: 11.0,
            max_on_duty_hours: 14.0,
            max_cycle_hours: 70.0,
            required_rest_break: 0.5,
            required_off_duty: 10.0,
        }
    }
}

/// Vehicle/route profile for turning a route distance into a driving-time
/// estimate. Injected rather than a constant so alternate profiles can be
/// swapped in without code changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripProfile {
    pub avg_speed_mph: f64,
}

impl Default for TripProfile {
    fn default() -> Self {
        TripProfile { avg_speed_mph: 55.0 }
    }
}

impl TripProfile {
    /// Rounds up to whole hours, matching how dispatch quotes trips.
    pub fn driving_hours(&self, distance_miles: f64) -> f64 {
        (distance_miles / self.avg_speed_mph).ceil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = HosLimits::default();
        assert_eq!(limits.max_driving_hours, 11.0);
        assert_eq!(limits.max_on_duty_hours, 14.0);
        assert_eq!(limits.max_cycle_hours, 70.0);
        assert_eq!(limits.required_rest_break, 0.5);
        assert_eq!(limits.required_off_duty, 10.0);
    }

    #[test]
    fn test_trip_profile_rounds_up() {
        let profile = TripProfile::default();
        assert_eq!(profile.driving_hours(467.0), 9.0);
        assert_eq!(profile.driving_hours(55.0), 1.0);
        assert_eq!(profile.driving_hours(0.0), 0.0);

        let slow = TripProfile { avg_speed_mph: 45.0 };
        assert_eq!(slow.driving_hours(467.0), 11.0);
    }
}
